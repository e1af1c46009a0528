use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Open the menu centred on a world position.
    Show(Vec3),
    Close,
    ConfigReload,
}
