/// Relay state of one sensor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeState {
    /// Idle; nothing heard yet this cycle.
    #[default]
    Sensing,
    /// Informed through a neighbor but not yet hit.
    Listening,
    /// Listening when an estimator locked; early warning issued.
    Alerted,
    /// Hit by a wave.  Terminal for the cycle.
    Detected,
}

impl NodeState {
    pub fn label(self) -> &'static str {
        match self {
            NodeState::Sensing => "sensing",
            NodeState::Listening => "listening",
            NodeState::Alerted => "alerted",
            NodeState::Detected => "detected",
        }
    }
}

impl std::fmt::Display for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One `(time, value)` point of a sensor's recorded motion.  `t` is seconds
/// since the sensor was first hit.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionSample {
    pub t:     f64,
    pub value: f64,
}
