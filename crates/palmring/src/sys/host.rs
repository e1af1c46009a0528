use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::menu::RadialController;
use async_channel::{Receiver, TryRecvError};
use handkit::trace::HandTrace;
use handkit::{InputFrame, Stepper};
use std::time::{Duration, Instant};

/// Frame loop around one controller: drains pending commands, then steps with the next
/// tracking frame.
pub struct Host {
    pub controller: RadialController,
    events: Receiver<AppEvent>,
    frame_time: Option<Duration>,
}

impl Host {
    /// `fps` of zero runs frames back to back.
    pub fn new(controller: RadialController, events: Receiver<AppEvent>, fps: u32) -> Self {
        Self {
            controller,
            events,
            frame_time: (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64)),
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Show(at) => self.controller.show(at),
            AppEvent::Close => self.controller.close(),
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    pub fn apply_config(&mut self, config: Config) {
        self.controller.set_tuning(config.menu);
    }

    /// Returns false once every sender is gone.
    fn drain_events(&mut self) -> bool {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.handle(event),
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Closed) => return false,
            }
        }
    }

    pub fn tick(&mut self, frame: &InputFrame) -> bool {
        let connected = self.drain_events();
        if self.controller.enabled() {
            self.controller.step(frame);
        }
        connected
    }

    /// Replays `trace` in a loop, stopping after `limit` frames when given.
    pub fn run(&mut self, trace: &HandTrace, limit: Option<usize>) -> usize {
        if !self.controller.initialize() {
            log::error!("Menu failed to initialize");
            return 0;
        }

        let mut count = 0;
        for frame in trace.looped() {
            if limit.is_some_and(|n| count >= n) {
                break;
            }
            let started = Instant::now();
            if !self.tick(frame) {
                log::debug!("Command channel closed");
            }
            count += 1;

            if let Some(frame_time) = self.frame_time {
                if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }

        self.controller.shutdown();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuTuning;
    use crate::demo::demo_layers;
    use crate::menu::MenuState;
    use glam::Vec3;
    use handkit::Sound;
    use handkit::sink::Recorder;

    fn host() -> (Host, async_channel::Sender<AppEvent>, Recorder) {
        let recorder = Recorder::new();
        let controller = RadialController::new(
            demo_layers(),
            MenuTuning::default(),
            Box::new(recorder.clone()),
            Box::new(recorder.clone()),
        );
        let (tx, rx) = async_channel::unbounded();
        (Host::new(controller, rx, 0), tx, recorder)
    }

    #[test]
    fn commands_apply_before_the_step() {
        let (mut host, tx, recorder) = host();
        tx.send_blocking(AppEvent::Show(Vec3::new(0.0, 1.3, -0.4)))
            .unwrap();

        assert!(host.tick(&InputFrame::default()));
        assert_eq!(host.controller.state(), MenuState::Open);
        assert_eq!(recorder.sounds(), vec![Sound::Click]);

        tx.send_blocking(AppEvent::Close).unwrap();
        host.tick(&InputFrame::default());
        assert_eq!(host.controller.state(), MenuState::Idle);
    }

    #[test]
    fn run_honours_frame_limit_and_shuts_down() {
        let (mut host, tx, recorder) = host();
        tx.send_blocking(AppEvent::Show(Vec3::ZERO)).unwrap();

        let ran = host.run(&HandTrace::still(), Some(5));
        assert_eq!(ran, 5);
        assert_eq!(host.controller.state(), MenuState::Idle);
        assert_eq!(recorder.sounds(), vec![Sound::Click, Sound::Unclick]);
    }

    #[test]
    fn disabled_controller_is_not_stepped() {
        let (mut host, _tx, recorder) = host();
        host.controller.set_enabled(false);

        let palm_at = Vec3::new(0.1, 1.3, -0.35);
        let head = Vec3::new(0.0, 1.6, 0.0);
        let mut frame = InputFrame {
            head: handkit::Pose::at(head),
            ..InputFrame::default()
        };
        frame.right.tracked = true;
        frame.right.palm = handkit::Pose::look_at(palm_at, head);
        frame.right.index_tip = palm_at;
        frame.right.just_gripped = true;

        host.tick(&frame);
        assert_eq!(host.controller.state(), MenuState::Idle);
        assert_eq!(recorder.line_count(), 0);

        host.controller.set_enabled(true);
        host.tick(&frame);
        assert_eq!(host.controller.state(), MenuState::Open);
    }

    #[test]
    fn closed_channel_is_reported() {
        let (mut host, tx, _) = host();
        drop(tx);
        assert!(!host.tick(&InputFrame::default()));
    }

    #[test]
    fn new_tuning_takes_effect() {
        let (mut host, _tx, _) = host();
        let mut config = Config::default();
        config.menu.outer_radius = 0.12;
        host.apply_config(config);
        assert_eq!(host.controller.tuning().outer_radius, 0.12);
    }
}
