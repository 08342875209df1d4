//! Wire opcodes understood by the controller board.
//!
//! These values are a wire compatibility contract and must stay bit-exact.
//! Motor, GPIO and keyboard opcodes live in the `0x80` range; program-flow
//! and IoT opcodes occupy `0xB0`..=`0xD1`. A handful of opcodes are reserved
//! by the firmware but never encoded by the host side (see
//! [`command_set`](super::command_set), where they have no spec row).

/// Start delimiter opening every frame in either direction.
pub const START_DELIMITER: u8 = 0x23;

/// Reserved zeroing opcode; recognized by the firmware, never sent.
pub const SET_ZERO: u8 = 0x00;

/// Drive one digital output port.
pub const GPIO_OUT: u8 = 0x80;
/// Position a servo motor.
pub const SERVO_MOTOR: u8 = 0x81;
/// Run both DC motor pairs.
pub const DC_MOTOR_ALL_ON: u8 = 0x82;
/// Stop all DC motors.
pub const DC_MOTOR_OFF: u8 = 0x83;
/// Forward a keyboard input value.
pub const IN_KEYBOARD: u8 = 0x84;
/// Run DC motor pair 1.
pub const DC_MOTOR_1_ON: u8 = 0x85;
/// Run DC motor pair 2.
pub const DC_MOTOR_2_ON: u8 = 0x86;

/// Push a literal number for a flow condition.
pub const FLOW_COND_NUM: u8 = 0xB0;
/// Begin a conditional.
pub const FLOW_COND_IF: u8 = 0xB1;
/// Open the if-branch body.
pub const FLOW_COND_IF_START: u8 = 0xB2;
/// Open the else-branch body.
pub const FLOW_COND_ELSE_START: u8 = 0xB3;
/// Close a conditional.
pub const FLOW_COND_IF_END: u8 = 0xB4;
/// Open a condition-guarded loop (firmware-side only).
pub const FLOW_LOOP_COND_START: u8 = 0xB5;
/// Close a condition-guarded loop (firmware-side only).
pub const FLOW_LOOP_COND_END: u8 = 0xB6;
/// Open an unbounded loop.
pub const FLOW_LOOP_START: u8 = 0xB7;
/// Close an unbounded loop.
pub const FLOW_LOOP_END: u8 = 0xB8;
/// Open a counted loop.
pub const FLOW_LOOP_CNT_START: u8 = 0xB9;
/// Close a counted loop.
pub const FLOW_LOOP_CNT_END: u8 = 0xBA;
/// Delay for a 16-bit number of seconds; uses the fixed delay frame layout.
pub const FLOW_LOOP_DELAY_SEC: u8 = 0xBB;
/// Write a program variable.
pub const FLOW_WRITE_VARIABLE: u8 = 0xBC;
/// Read a program variable (firmware-side only).
pub const FLOW_READ_VARIABLE: u8 = 0xBD;
/// Assign a program variable with an arithmetic operation.
pub const FLOW_SET_VARIABLE: u8 = 0xBE;
/// Servo angle readback value (firmware-side only).
pub const IOT_SERVO_MOTOR_ANGLE_VALUE: u8 = 0xBF;
/// Break out of or continue a loop.
pub const FLOW_LOOP_BREAK_CONTINUE: u8 = 0xC0;
/// Comparison-sign judgement.
pub const FLOW_JGMT_SIGN: u8 = 0xC1;
/// Boolean judgement (firmware-side only).
pub const FLOW_JGMT_BOOL: u8 = 0xC2;
/// Logic-operator judgement.
pub const FLOW_JGMT_LOGIC: u8 = 0xC3;
/// Read remote IoT state.
pub const IOT_READ_REMOTE: u8 = 0xC4;
/// Stop all IoT DC motors.
pub const IOT_DC_MOTOR_OFF: u8 = 0xC5;
/// Set IoT DC motor speeds.
pub const IOT_DC_MOTOR_SPEED: u8 = 0xC6;
/// Position an IoT servo motor.
pub const IOT_SERVO_MOTOR_ANGLE: u8 = 0xC7;
/// Drive an IoT digital output.
pub const IOT_DIGIT_OUTPUT: u8 = 0xC8;
/// Sample an IoT analog input.
pub const IOT_ANALOG_INPUT: u8 = 0xC9;
/// Sample an IoT digital input.
pub const IOT_DIGIT_INPUT: u8 = 0xCA;
/// Run IoT DC motor pair 1.
pub const IOT_DC_MOTOR_1_ON: u8 = 0xCB;
/// Run IoT DC motor pair 2.
pub const IOT_DC_MOTOR_2_ON: u8 = 0xCC;
/// Set the value of both IoT DC motor pairs.
pub const IOT_DC_ALL_MOTOR_VALUE: u8 = 0xCD;
/// Set the value of IoT DC motor pair 1.
pub const IOT_DC_MOTOR_1_VALUE: u8 = 0xCE;
/// Set the value of IoT DC motor pair 2.
pub const IOT_DC_MOTOR_2_VALUE: u8 = 0xCF;
/// Begin persisting a block program to the board.
pub const BLOCK_SAVE_START: u8 = 0xD0;
/// Finish persisting a block program.
pub const BLOCK_SAVE_END: u8 = 0xD1;
