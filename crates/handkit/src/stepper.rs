use crate::input::InputFrame;

/// Per-frame task lifecycle a host drives once per application frame.
pub trait Stepper {
    fn enabled(&self) -> bool {
        true
    }

    fn initialize(&mut self) -> bool {
        true
    }

    fn step(&mut self, input: &InputFrame);

    fn shutdown(&mut self) {}
}
