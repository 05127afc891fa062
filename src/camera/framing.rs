//! Focus and framing: which part of the scene the camera looks at, how it
//! glides there, and how far it may zoom once it arrives.
//!
//! Everything here is plain data driven by explicit deltas so it can be
//! exercised without an `App`. `focus.rs` feeds it positions from the world
//! and pushes the resulting poses into the `PanOrbitCamera`.

use bevy::prelude::*;

use crate::body::BodyId;
use crate::camera::config::CameraConfig;

/// What the camera is framing. `WholeSystem` is the sentinel for "no body".
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusTarget {
    #[default]
    WholeSystem,
    Body(BodyId),
}

/// Camera position plus the point it looks at.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target:   Vec3,
}

impl CameraPose {
    /// Straight-line interpolation of both points. `t` outside `0..=1` is
    /// clamped and the end points are returned exactly.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return to;
        }
        Self {
            position: self.position.lerp(to.position, t),
            target:   self.target.lerp(to.target, t),
        }
    }

    /// Orbit parameters as `PanOrbitCamera` stores them: yaw about +Y measured
    /// from +Z, pitch above the XZ plane, and radius.
    pub fn orbit_angles(&self) -> (f32, f32, f32) {
        let offset = self.position - self.target;
        let yaw = offset.x.atan2(offset.z);
        let pitch = offset.y.atan2(offset.x.hypot(offset.z));
        (yaw, pitch, offset.length())
    }
}

/// Allowed camera-to-target distance range.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct OrbitBounds {
    pub min: f32,
    pub max: f32,
}

/// Where a focused body is this frame and how close the camera may get to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFrame {
    pub position:     Vec3,
    pub min_distance: f32,
}

impl BodyFrame {
    /// Pose that keeps the body centred, seen from above and to one side.
    pub fn pose(&self, config: &CameraConfig) -> CameraPose {
        CameraPose {
            position: self.position + config.framing_offset * self.min_distance,
            target:   self.position,
        }
    }
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct CameraTransition {
    from:     CameraPose,
    to:       CameraPose,
    elapsed:  f32,
    duration: f32,
}

impl CameraTransition {
    pub const fn new(from: CameraPose, to: CameraPose, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration,
        }
    }

    fn advance(&mut self, real_delta: f32) { self.elapsed += real_delta.max(0.0); }

    /// `elapsed / duration`, clamped to `0..=1`. A zero-length transition is
    /// already finished.
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn pose(&self) -> CameraPose { self.from.lerp(self.to, self.fraction()) }

    pub fn is_finished(&self) -> bool { self.fraction() >= 1.0 }
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub enum FramingState {
    /// Settled on the focus; a focused body is followed as it moves.
    Tracking,
    Transitioning(CameraTransition),
}

#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource)]
pub struct FramingController {
    focus:  FocusTarget,
    state:  FramingState,
    bounds: OrbitBounds,
}

impl FramingController {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            focus:  FocusTarget::WholeSystem,
            state:  FramingState::Tracking,
            bounds: config.orbit_bounds(config.system_min_distance),
        }
    }

    pub const fn focus(&self) -> FocusTarget { self.focus }

    /// Zoom range for the current focus. Only applied to the camera while
    /// tracking.
    pub const fn bounds(&self) -> OrbitBounds { self.bounds }

    pub const fn is_transitioning(&self) -> bool {
        matches!(self.state, FramingState::Transitioning(_))
    }

    pub fn focus_whole_system(&mut self, current: CameraPose, config: &CameraConfig) {
        self.begin(
            FocusTarget::WholeSystem,
            config.system_min_distance,
            config.system_pose(),
            current,
            config,
        );
    }

    pub fn focus_body(
        &mut self,
        id: BodyId,
        frame: BodyFrame,
        current: CameraPose,
        config: &CameraConfig,
    ) {
        self.begin(
            FocusTarget::Body(id),
            frame.min_distance,
            frame.pose(config),
            current,
            config,
        );
    }

    /// Starting a transition from wherever the camera is right now means a
    /// focus change mid-flight never jumps.
    fn begin(
        &mut self,
        focus: FocusTarget,
        min_distance: f32,
        destination: CameraPose,
        current: CameraPose,
        config: &CameraConfig,
    ) {
        self.focus = focus;
        self.bounds = config.orbit_bounds(min_distance);
        self.state = FramingState::Transitioning(CameraTransition::new(
            current,
            destination,
            config.transition_secs,
        ));
    }

    /// Advances any transition by a wall-clock delta and returns the pose the
    /// camera should take this frame. `focused` is the focused body's current
    /// frame; it's ignored while transitioning because the destination was
    /// fixed when the transition began.
    ///
    /// `None` means the camera is left to the user: settled on the whole
    /// system, or the focused body couldn't be found.
    pub fn update(
        &mut self,
        real_delta: f32,
        focused: Option<BodyFrame>,
        config: &CameraConfig,
    ) -> Option<CameraPose> {
        if let FramingState::Transitioning(transition) = &mut self.state {
            transition.advance(real_delta);
            let pose = transition.pose();
            if transition.is_finished() {
                self.state = FramingState::Tracking;
            }
            return Some(pose);
        }

        match (self.focus, focused) {
            (FocusTarget::Body(_), Some(frame)) => Some(frame.pose(config)),
            _ => None,
        }
    }
}

impl FromWorld for FramingController {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource::<CameraConfig>().copied().unwrap_or_default();
        Self::new(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn config() -> CameraConfig { CameraConfig::default() }

    fn start() -> CameraPose {
        CameraPose {
            position: Vec3::new(0.0, 20.0, 20.0),
            target:   Vec3::ZERO,
        }
    }

    fn earth_frame() -> BodyFrame {
        BodyFrame {
            position:     Vec3::new(5.0, 0.0, 0.0),
            min_distance: 0.5,
        }
    }

    fn earth() -> BodyId { BodyId::new(3) }

    #[test]
    fn starts_on_whole_system() {
        let config = config();
        let controller = FramingController::new(&config);

        assert_eq!(controller.focus(), FocusTarget::WholeSystem);
        assert!(!controller.is_transitioning());
        assert!((controller.bounds().min - 20.0).abs() < EPSILON);
        assert!((controller.bounds().max - 100.0).abs() < EPSILON);
    }

    #[test]
    fn transition_begins_exactly_at_the_current_pose() {
        let config = config();
        let mut controller = FramingController::new(&config);
        controller.focus_body(earth(), earth_frame(), start(), &config);

        assert_eq!(controller.update(0.0, None, &config), Some(start()));
    }

    #[test]
    fn transition_ends_exactly_at_the_framing_pose() {
        let config = config();
        let mut controller = FramingController::new(&config);
        controller.focus_body(earth(), earth_frame(), start(), &config);

        let mut last = None;
        for _ in 0..3 {
            last = controller.update(0.5, Some(earth_frame()), &config);
        }

        assert_eq!(last, Some(earth_frame().pose(&config)));
        assert!(!controller.is_transitioning());
    }

    #[test]
    fn framing_pose_is_offset_by_min_distance() {
        let pose = earth_frame().pose(&config());
        assert_eq!(pose.target, Vec3::new(5.0, 0.0, 0.0));
        assert!((pose.position - Vec3::new(5.75, 0.375, 0.75)).length() < EPSILON);
    }

    #[test]
    fn transition_is_linear_in_wall_clock_time() {
        let config = config();
        let mut controller = FramingController::new(&config);
        controller.focus_body(earth(), earth_frame(), start(), &config);

        let halfway = controller.update(0.75, None, &config);
        let expected = start().lerp(earth_frame().pose(&config), 0.5);
        assert_eq!(halfway, Some(expected));
        assert!(controller.is_transitioning());
    }

    #[test]
    fn oversized_delta_clamps_to_the_destination() {
        let config = config();
        let mut controller = FramingController::new(&config);
        controller.focus_whole_system(start(), &config);

        assert_eq!(controller.update(10.0, None, &config), Some(config.system_pose()));
        assert!(!controller.is_transitioning());
    }

    #[test]
    fn retrigger_mid_transition_has_no_discontinuity() {
        let config = config();
        let mut controller = FramingController::new(&config);
        controller.focus_body(earth(), earth_frame(), start(), &config);

        let midway = controller.update(0.6, None, &config);
        assert!(midway.is_some());
        let midway = midway.unwrap_or_else(start);

        let mars = BodyFrame {
            position:     Vec3::new(-8.0, 0.0, 2.0),
            min_distance: 0.3,
        };
        controller.focus_body(BodyId::new(5), mars, midway, &config);

        assert_eq!(controller.focus(), FocusTarget::Body(BodyId::new(5)));
        assert_eq!(controller.update(0.0, None, &config), Some(midway));
    }

    #[test]
    fn bounds_are_set_when_the_transition_starts() {
        let config = config();
        let mut controller = FramingController::new(&config);
        controller.focus_body(earth(), earth_frame(), start(), &config);

        assert!((controller.bounds().min - 0.5).abs() < EPSILON);
        assert!((controller.bounds().max - 2.5).abs() < EPSILON);

        controller.focus_whole_system(start(), &config);
        assert!((controller.bounds().min - config.system_min_distance).abs() < EPSILON);
    }

    #[test]
    fn tracking_follows_the_body() {
        let config = config();
        let mut controller = FramingController::new(&config);
        controller.focus_body(earth(), earth_frame(), start(), &config);
        controller.update(2.0, Some(earth_frame()), &config);

        let moved = BodyFrame {
            position: Vec3::new(0.0, 0.0, 5.0),
            ..earth_frame()
        };
        assert_eq!(controller.update(0.016, Some(moved), &config), Some(moved.pose(&config)));
    }

    #[test]
    fn settled_whole_system_leaves_the_camera_alone() {
        let config = config();
        let mut controller = FramingController::new(&config);
        assert_eq!(controller.update(0.016, Some(earth_frame()), &config), None);
    }

    #[test]
    fn zero_length_transition_finishes_immediately() {
        let config = CameraConfig {
            transition_secs: 0.0,
            ..config()
        };
        let mut controller = FramingController::new(&config);
        controller.focus_body(earth(), earth_frame(), start(), &config);

        assert_eq!(controller.update(0.0, None, &config), Some(earth_frame().pose(&config)));
        assert!(!controller.is_transitioning());
    }

    #[test]
    fn orbit_angles_rebuild_the_offset() {
        let pose = CameraPose {
            position: Vec3::new(3.0, 2.0, -1.0),
            target:   Vec3::new(1.0, 0.5, 0.5),
        };
        let (yaw, pitch, radius) = pose.orbit_angles();

        let rotation = Quat::from_rotation_y(yaw) * Quat::from_rotation_x(-pitch);
        let rebuilt = pose.target + rotation * Vec3::new(0.0, 0.0, radius);
        assert!((rebuilt - pose.position).length() < 1e-4);
    }
}
