use derive_more::{AsRef, Deref, Display, From, Into};
use glam::{Mat4, Quat, Vec3};
use handkit::{IconHandle, Renderer, SpriteDraw, TextAlign, TextDraw};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::LABEL_FOCUS_SCALE;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct LayerName(String);

handkit::impl_string_newtype!(LayerName);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemName(String);

handkit::impl_string_newtype!(ItemName);

/// Identity of an item, stable for its whole lifetime and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(u64);

impl ItemId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAction {
    /// Navigate into the named layer.
    Layer(LayerName),
    /// Return to the previously active layer.
    Back,
    /// Dismiss the menu.
    Close,
}

/// Where and how an item is being drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    /// Menu-local centre of the item's sector.
    pub position: Vec3,
    /// Radius the item's content should fit in.
    pub radius: f32,
    /// Sector centre in degrees.
    pub angle: f32,
    pub focused: bool,
    /// Menu-local to world.
    pub transform: Mat4,
}

pub type ItemDrawFn = fn(&MenuItem, &ItemPlacement, &mut dyn Renderer);

#[derive(Clone, Copy, Default)]
pub enum ItemVisual {
    /// Billboard label, with the icon above it when present.
    #[default]
    Label,
    Custom(ItemDrawFn),
}

impl fmt::Debug for ItemVisual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label => f.write_str("Label"),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

pub type Callback = Box<dyn FnMut()>;

pub struct MenuItem {
    id: ItemId,
    pub name: ItemName,
    pub icon: Option<IconHandle>,
    pub action: ItemAction,
    pub visual: ItemVisual,
    callback: Option<Callback>,
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("icon", &self.icon)
            .field("action", &self.action)
            .field("visual", &self.visual)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl MenuItem {
    pub fn new(name: impl Into<String>, action: ItemAction) -> Self {
        Self {
            id: ItemId::next(),
            name: ItemName::new(name),
            icon: None,
            action,
            visual: ItemVisual::Label,
            callback: None,
        }
    }

    pub fn layer(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, ItemAction::Layer(LayerName::new(target)))
    }

    pub fn back(name: impl Into<String>) -> Self {
        Self::new(name, ItemAction::Back)
    }

    pub fn close(name: impl Into<String>) -> Self {
        Self::new(name, ItemAction::Close)
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(IconHandle::new(icon));
        self
    }

    pub fn with_callback(mut self, callback: impl FnMut() + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn with_visual(mut self, visual: ItemVisual) -> Self {
        self.visual = visual;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn target_layer(&self) -> Option<&LayerName> {
        match &self.action {
            ItemAction::Layer(target) => Some(target),
            _ => None,
        }
    }

    pub fn is_back(&self) -> bool {
        self.action == ItemAction::Back
    }

    /// Leads somewhere else in the menu, so it gets a child indicator.
    pub fn navigates(&self) -> bool {
        matches!(self.action, ItemAction::Layer(_) | ItemAction::Back)
    }

    pub fn invoke(&mut self) {
        if let Some(callback) = self.callback.as_mut() {
            callback();
        }
    }

    pub fn draw(&self, placement: &ItemPlacement, renderer: &mut dyn Renderer) {
        match self.visual {
            ItemVisual::Label => draw_label(self, placement, renderer),
            ItemVisual::Custom(draw) => draw(self, placement, renderer),
        }
    }
}

fn draw_label(item: &MenuItem, placement: &ItemPlacement, renderer: &mut dyn Renderer) {
    let scale = if placement.focused {
        LABEL_FOCUS_SCALE
    } else {
        1.0
    };
    // text baseline runs tangent to the ring
    let rotation = Quat::from_rotation_z((placement.angle - 90.0).to_radians());
    let local = Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, placement.position);

    if let Some(icon) = &item.icon {
        let icon_size = placement.radius * scale;
        let offset = Mat4::from_scale_rotation_translation(
            Vec3::splat(icon_size),
            rotation,
            placement.position + rotation * Vec3::new(0.0, icon_size * 0.5, 0.0),
        );
        renderer.add_sprite(SpriteDraw {
            icon: icon.clone(),
            transform: placement.transform * offset,
        });
    }

    renderer.add_text(TextDraw {
        text: item.name.to_string(),
        transform: placement.transform * local,
        align: if item.icon.is_some() {
            TextAlign::TopCenter
        } else {
            TextAlign::BottomCenter
        },
    });
}
