use super::geometry;
use super::item::{ItemAction, ItemId, LayerName, MenuItem};

/// One ring of items. Item order decides which sector each item occupies.
#[derive(Debug)]
pub struct MenuLayer {
    pub name: LayerName,
    /// Rotation of sector 0, in degrees.
    pub start_angle: f32,
    items: Vec<MenuItem>,
    back_angle: f32,
    parent: Option<LayerName>,
    children: Vec<MenuLayer>,
    /// The item in the parent that leads here, when this layer was added as a child.
    link_item: Option<ItemId>,
}

impl MenuLayer {
    pub fn new(name: impl Into<String>, items: Vec<MenuItem>) -> Self {
        let back_angle = derive_back_angle(&items);
        Self {
            name: LayerName::new(name),
            start_angle: 0.0,
            items,
            back_angle,
            parent: None,
            children: Vec::new(),
            link_item: None,
        }
    }

    pub fn with_start_angle(mut self, start_angle: f32) -> Self {
        self.start_angle = start_angle;
        self
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [MenuItem] {
        &mut self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Centre of the back item's sector, or 0 without one. Fixed at construction.
    pub fn back_angle(&self) -> f32 {
        self.back_angle
    }

    pub fn parent(&self) -> Option<&LayerName> {
        self.parent.as_ref()
    }

    pub fn children(&self) -> &[MenuLayer] {
        &self.children
    }

    pub fn add_child(&mut self, mut child: MenuLayer) {
        let link = MenuItem::new(
            child.name.to_string(),
            ItemAction::Layer(child.name.clone()),
        );
        child.parent = Some(self.name.clone());
        child.link_item = Some(link.id());
        self.items.push(link);
        self.children.push(child);
    }

    pub fn remove_child(&mut self, name: &str) -> Option<MenuLayer> {
        let pos = self.children.iter().position(|c| c.name == *name)?;
        let mut child = self.children.remove(pos);
        if let Some(link) = child.link_item.take() {
            self.remove_item(link);
        }
        child.parent = None;
        Some(child)
    }

    pub fn find_child(&self, name: &str) -> Option<&MenuLayer> {
        self.children.iter().find(|c| c.name == *name)
    }

    pub fn find_item(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.name == *name)
    }

    pub fn add_item(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<MenuItem> {
        let pos = self.items.iter().position(|i| i.id() == id)?;
        Some(self.items.remove(pos))
    }

    pub(crate) fn set_parent(&mut self, parent: LayerName) {
        self.parent = Some(parent);
    }

    pub(crate) fn take_children(&mut self) -> Vec<MenuLayer> {
        std::mem::take(&mut self.children)
    }
}

/// The first back item wins when a layer has several.
fn derive_back_angle(items: &[MenuItem]) -> f32 {
    items
        .iter()
        .position(MenuItem::is_back)
        .map(|i| geometry::sector_center(i, items.len(), 0.0))
        .unwrap_or(0.0)
}
