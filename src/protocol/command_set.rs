//! Static command specification table.
//!
//! Every encodable command is one row here: its opcode, the ordered request
//! fields it consumes, and its frame layout. The encoder is generic over this
//! table, so adding a command means adding a row, not a branch. Opcodes that
//! the firmware reserves but the host never sends simply have no row; a
//! request naming one of them encodes to nothing and is dropped.

use serde::{Deserialize, Serialize};

use super::opcode;

/// Named request fields a command may carry.
///
/// The wire names (`port`, `l1`, `type`, …) are what hosts put in the loose
/// request maps delivered over the exchange bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Port,
    Value,
    Angle,
    Speed,
    L1,
    R1,
    L2,
    R2,
    Variable,
    Calc,
    Jgmt,
    /// Wire name `type`, the delay command's timing mode selector.
    #[serde(rename = "type")]
    Kind,
}

impl FieldName {
    /// The field's wire name as it appears in host request maps.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Port => "port",
            FieldName::Value => "value",
            FieldName::Angle => "angle",
            FieldName::Speed => "speed",
            FieldName::L1 => "l1",
            FieldName::R1 => "r1",
            FieldName::L2 => "l2",
            FieldName::R2 => "r2",
            FieldName::Variable => "variable",
            FieldName::Calc => "calc",
            FieldName::Jgmt => "jgmt",
            FieldName::Kind => "type",
        }
    }

    /// Parse a wire name into a field. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<FieldName> {
        match name {
            "port" => Some(FieldName::Port),
            "value" => Some(FieldName::Value),
            "angle" => Some(FieldName::Angle),
            "speed" => Some(FieldName::Speed),
            "l1" => Some(FieldName::L1),
            "r1" => Some(FieldName::R1),
            "l2" => Some(FieldName::L2),
            "r2" => Some(FieldName::R2),
            "variable" => Some(FieldName::Variable),
            "calc" => Some(FieldName::Calc),
            "jgmt" => Some(FieldName::Jgmt),
            "type" => Some(FieldName::Kind),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frame layout selector for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `[0x23, argc+1, opcode, args…, cksum]` with one byte per field.
    Default,
    /// Fixed 7-byte delay frame: `[0x23, 0x04, opcode, kind, secLo, secHi, cksum]`
    /// with the seconds field split little-endian across two bytes.
    DelaySeconds,
}

/// One row of the command table.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Wire opcode.
    pub opcode: u8,
    /// Request fields in the order they are laid into the frame.
    pub fields: &'static [FieldName],
    /// Frame layout rule.
    pub layout: Layout,
}

use FieldName::*;

macro_rules! row {
    ($op:expr, [$($field:expr),*]) => {
        CommandSpec { opcode: $op, fields: &[$($field),*], layout: Layout::Default }
    };
    ($op:expr, [$($field:expr),*], $layout:expr) => {
        CommandSpec { opcode: $op, fields: &[$($field),*], layout: $layout }
    };
}

/// The full encodable command set. Wire compatibility contract.
pub const COMMAND_SPECS: &[CommandSpec] = &[
    row!(opcode::GPIO_OUT, [Port, Value]),
    row!(opcode::SERVO_MOTOR, [Port, Angle, Speed]),
    row!(opcode::DC_MOTOR_ALL_ON, [L1, R1, L2, R2]),
    row!(opcode::DC_MOTOR_OFF, []),
    row!(opcode::IN_KEYBOARD, [Value]),
    row!(opcode::DC_MOTOR_1_ON, [L1, R1]),
    row!(opcode::DC_MOTOR_2_ON, [L2, R2]),
    row!(opcode::FLOW_COND_NUM, [Value]),
    row!(opcode::FLOW_COND_IF, []),
    row!(opcode::FLOW_COND_IF_START, []),
    row!(opcode::FLOW_COND_ELSE_START, []),
    row!(opcode::FLOW_COND_IF_END, []),
    row!(opcode::FLOW_LOOP_START, []),
    row!(opcode::FLOW_LOOP_END, []),
    row!(opcode::FLOW_LOOP_CNT_START, [Value]),
    row!(opcode::FLOW_LOOP_CNT_END, []),
    row!(opcode::FLOW_LOOP_DELAY_SEC, [Kind, Value], Layout::DelaySeconds),
    row!(opcode::FLOW_WRITE_VARIABLE, [Variable]),
    row!(opcode::FLOW_SET_VARIABLE, [Variable, Value, Calc]),
    row!(opcode::FLOW_LOOP_BREAK_CONTINUE, [Value]),
    row!(opcode::FLOW_JGMT_SIGN, [Jgmt]),
    row!(opcode::FLOW_JGMT_LOGIC, [Value]),
    row!(opcode::IOT_READ_REMOTE, []),
    row!(opcode::IOT_DC_MOTOR_OFF, []),
    row!(opcode::IOT_DC_MOTOR_SPEED, [L1, R1, L2, R2]),
    row!(opcode::IOT_SERVO_MOTOR_ANGLE, [Port, Angle, Speed]),
    row!(opcode::IOT_DIGIT_OUTPUT, [Port, Value]),
    row!(opcode::IOT_ANALOG_INPUT, [Port]),
    row!(opcode::IOT_DIGIT_INPUT, [Port]),
    row!(opcode::IOT_DC_MOTOR_1_ON, [L1, R1]),
    row!(opcode::IOT_DC_MOTOR_2_ON, [L2, R2]),
    row!(opcode::IOT_DC_ALL_MOTOR_VALUE, [L1, R1, L2, R2]),
    row!(opcode::IOT_DC_MOTOR_1_VALUE, [L1, R1]),
    row!(opcode::IOT_DC_MOTOR_2_VALUE, [L2, R2]),
    row!(opcode::BLOCK_SAVE_START, [Value]),
    row!(opcode::BLOCK_SAVE_END, []),
];

/// Look up the spec row for an opcode. `None` means the opcode is never
/// encoded by the host side.
pub fn command_spec(opcode: u8) -> Option<&'static CommandSpec> {
    COMMAND_SPECS.iter().find(|spec| spec.opcode == opcode)
}
