// Camera sequencing: every move goes home first, then frames the target.
use std::collections::VecDeque;

use crate::config::CameraTiming;
use crate::model::FeatureId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraTarget {
    Home,
    Department(FeatureId),
    /// Stay where the view is, abandoning any flight in progress.
    Hold,
}

/// Last camera move asked for by the reducer. `id` grows with every request
/// so repeated clicks on the same department still replay the flight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CameraRequest {
    pub id: u64,
    pub target: Option<CameraTarget>,
}

impl CameraRequest {
    pub fn next(&self, target: CameraTarget) -> Self {
        Self {
            id: self.id.wrapping_add(1),
            target: Some(target),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraStep {
    /// Snap to the home view without animating.
    JumpHome,
    /// Animate to the home view; the next step waits for `moveend`.
    FlyHome,
    Pause { ms: u32 },
    FrameDepartment(FeatureId),
    /// Halt whatever animation is running.
    Stop,
}

pub fn plan(target: CameraTarget, timing: &CameraTiming) -> VecDeque<CameraStep> {
    match target {
        CameraTarget::Home => VecDeque::from([CameraStep::JumpHome]),
        CameraTarget::Hold => VecDeque::from([CameraStep::Stop]),
        CameraTarget::Department(feature) => VecDeque::from([
            CameraStep::FlyHome,
            CameraStep::Pause {
                ms: timing.pause_ms,
            },
            CameraStep::FrameDepartment(feature),
        ]),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraToken(u64);

/// Hands out tokens; only the newest one is current.
#[derive(Debug, Default)]
pub struct CameraSequencer {
    generation: u64,
}

impl CameraSequencer {
    pub fn begin(&mut self) -> CameraToken {
        self.generation = self.generation.wrapping_add(1);
        CameraToken(self.generation)
    }

    pub fn is_current(&self, token: CameraToken) -> bool {
        self.generation == token.0
    }
}

/// Steps still to run for one request.
#[derive(Debug)]
pub struct CameraSequence {
    token: CameraToken,
    steps: VecDeque<CameraStep>,
}

impl CameraSequence {
    pub fn new(token: CameraToken, steps: VecDeque<CameraStep>) -> Self {
        Self { token, steps }
    }

    /// Yields the next step, or nothing once a newer request has started.
    pub fn next_step(&mut self, sequencer: &CameraSequencer) -> Option<CameraStep> {
        if !sequencer.is_current(self.token) {
            self.steps.clear();
            return None;
        }
        self.steps.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use pretty_assertions::assert_eq;

    fn timing() -> CameraTiming {
        ViewerConfig::default().camera
    }

    #[test]
    fn department_flight_goes_home_then_pauses_then_frames() {
        let steps: Vec<_> = plan(CameraTarget::Department(FeatureId(3)), &timing())
            .into_iter()
            .collect();
        assert_eq!(
            steps,
            vec![
                CameraStep::FlyHome,
                CameraStep::Pause { ms: 125 },
                CameraStep::FrameDepartment(FeatureId(3)),
            ]
        );
    }

    #[test]
    fn home_is_a_single_jump() {
        let steps: Vec<_> = plan(CameraTarget::Home, &timing()).into_iter().collect();
        assert_eq!(steps, vec![CameraStep::JumpHome]);
    }

    #[test]
    fn hold_only_stops_the_view() {
        let steps: Vec<_> = plan(CameraTarget::Hold, &timing()).into_iter().collect();
        assert_eq!(steps, vec![CameraStep::Stop]);
    }

    #[test]
    fn newer_request_cancels_pending_steps() {
        let mut sequencer = CameraSequencer::default();
        let mut first = CameraSequence::new(
            sequencer.begin(),
            plan(CameraTarget::Department(FeatureId(0)), &timing()),
        );
        assert_eq!(first.next_step(&sequencer), Some(CameraStep::FlyHome));

        let mut second = CameraSequence::new(
            sequencer.begin(),
            plan(CameraTarget::Department(FeatureId(1)), &timing()),
        );
        assert_eq!(first.next_step(&sequencer), None);
        assert_eq!(first.next_step(&sequencer), None);

        assert_eq!(second.next_step(&sequencer), Some(CameraStep::FlyHome));
        assert_eq!(second.next_step(&sequencer), Some(CameraStep::Pause { ms: 125 }));
        assert_eq!(
            second.next_step(&sequencer),
            Some(CameraStep::FrameDepartment(FeatureId(1)))
        );
        assert_eq!(second.next_step(&sequencer), None);
    }

    #[test]
    fn request_ids_always_advance() {
        let a = CameraRequest::default().next(CameraTarget::Department(FeatureId(0)));
        let b = a.next(CameraTarget::Department(FeatureId(0)));
        assert_ne!(a, b);
        assert_eq!(b.id, 2);
    }
}
