use serde::{Deserialize, Serialize};

/// Discrete dependency label attached to an edge.
///
/// The six ordinal levels come from the agent behaviour dependency graph
/// format. Any other integer is carried through as `Other` and decays with
/// the weight table's default factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum EdgeKind {
    /// 1: control dependency.
    Control,
    /// 2: inter-agent message dependency.
    InterAgentMessage,
    /// 3: procedure call dependency.
    ProcedureCall,
    /// 4: return dependency.
    Return,
    /// 5: inter-agent data dependency.
    InterAgentData,
    /// 6: data dependency.
    Data,
    /// Unrecognized label.
    Other(i64),
}

impl EdgeKind {
    /// All recognized kinds, ordered by code.
    pub const KNOWN: [EdgeKind; 6] = [
        EdgeKind::Control,
        EdgeKind::InterAgentMessage,
        EdgeKind::ProcedureCall,
        EdgeKind::Return,
        EdgeKind::InterAgentData,
        EdgeKind::Data,
    ];

    /// Decode from the integer label used in graph descriptions.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => EdgeKind::Control,
            2 => EdgeKind::InterAgentMessage,
            3 => EdgeKind::ProcedureCall,
            4 => EdgeKind::Return,
            5 => EdgeKind::InterAgentData,
            6 => EdgeKind::Data,
            other => EdgeKind::Other(other),
        }
    }

    /// Encode back to the integer label.
    pub fn code(self) -> i64 {
        match self {
            EdgeKind::Control => 1,
            EdgeKind::InterAgentMessage => 2,
            EdgeKind::ProcedureCall => 3,
            EdgeKind::Return => 4,
            EdgeKind::InterAgentData => 5,
            EdgeKind::Data => 6,
            EdgeKind::Other(code) => code,
        }
    }

    /// Zero-based slot in the weight table, `None` for unrecognized labels.
    pub(crate) fn ordinal(self) -> Option<usize> {
        match self {
            EdgeKind::Other(_) => None,
            known => Some((known.code() - 1) as usize),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Control => "control",
            EdgeKind::InterAgentMessage => "inter_agent_message",
            EdgeKind::ProcedureCall => "procedure_call",
            EdgeKind::Return => "return",
            EdgeKind::InterAgentData => "inter_agent_data",
            EdgeKind::Data => "data",
            EdgeKind::Other(_) => "other",
        }
    }
}

impl From<i64> for EdgeKind {
    fn from(code: i64) -> Self {
        EdgeKind::from_code(code)
    }
}

impl From<EdgeKind> for i64 {
    fn from(kind: EdgeKind) -> Self {
        kind.code()
    }
}
