use tracing::debug;

use sn_core::Point;
use sn_wave::Wave;

/// Where a site stands in the alert/evacuation race.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SiteState {
    #[default]
    Calm,
    /// Warned by an estimator lock; evacuation clock running.
    Alerting,
    /// The front arrived after the evacuation window closed.
    Safe,
    /// The front arrived before the site could be evacuated.
    Affected,
}

impl SiteState {
    /// `Safe` and `Affected` do not change again until reset.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SiteState::Safe | SiteState::Affected)
    }

    pub fn label(self) -> &'static str {
        match self {
            SiteState::Calm => "calm",
            SiteState::Alerting => "alerting",
            SiteState::Safe => "safe",
            SiteState::Affected => "affected",
        }
    }
}

impl std::fmt::Display for SiteState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named population center with a square footprint of `size_px`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site {
    pub name:     String,
    pub position: Point,
    pub size_px:  f64,
    state:        SiteState,
    alert_start:  Option<f64>,
}

impl Site {
    pub fn new(name: impl Into<String>, position: Point, size_px: f64) -> Self {
        Self {
            name: name.into(),
            position,
            size_px,
            state: SiteState::Calm,
            alert_start: None,
        }
    }

    #[inline]
    pub fn state(&self) -> SiteState {
        self.state
    }

    /// Simulated seconds at which the site entered `Alerting`.
    #[inline]
    pub fn alert_start(&self) -> Option<f64> {
        self.alert_start
    }

    #[inline]
    pub fn half_size(&self) -> f64 {
        self.size_px / 2.0
    }

    /// `true` when the front's outer edge touches the site's footprint.
    pub fn collides(&self, wave: &Wave) -> bool {
        wave.reaches(self.position.distance(wave.origin()), self.half_size())
    }

    /// `true` when the site lies within a wave's full physical reach.
    pub fn within_reach(&self, wave: &Wave) -> bool {
        self.position.distance(wave.origin()) <= wave.total_radius_px() + self.half_size()
    }

    /// Start the evacuation clock.  Only a calm site can be alerted; returns
    /// `true` if the state changed.
    pub fn alert(&mut self, now: f64) -> bool {
        if self.state != SiteState::Calm {
            return false;
        }
        self.state = SiteState::Alerting;
        self.alert_start = Some(now);
        debug!(site = %self.name, now, "site alerting");
        true
    }

    /// Resolve the race when a front reaches the site at `now`.  Returns the
    /// new state if it changed.
    pub fn on_wave_contact(&mut self, now: f64, evacuation_secs: f64) -> Option<SiteState> {
        if self.state.is_terminal() {
            return None;
        }
        let next = match self.alert_start {
            Some(start) if self.state == SiteState::Alerting && now - start >= evacuation_secs => SiteState::Safe,
            _ => SiteState::Affected,
        };
        self.state = next;
        debug!(site = %self.name, state = %next, now, "site resolved");
        Some(next)
    }

    /// Back to `Calm` with no running clock.
    pub fn reset(&mut self) {
        self.state = SiteState::Calm;
        self.alert_start = None;
    }
}
