use super::item::MenuItem;
use super::layer::MenuLayer;
use std::collections::HashSet;

pub const ROOT_LAYER: &str = "Root";

/// Every layer a menu can show, flat. Index 0 is the root.
#[derive(Debug)]
pub struct LayerRegistry {
    layers: Vec<MenuLayer>,
}

impl LayerRegistry {
    /// Child layers added with `MenuLayer::add_child` are moved in right after their parent.
    /// An empty list gets a root holding a single cancel item.
    pub fn new(layers: Vec<MenuLayer>) -> Self {
        let mut flat = Vec::with_capacity(layers.len());
        for layer in layers {
            flatten(layer, &mut flat);
        }
        if flat.is_empty() {
            flat.push(MenuLayer::new(ROOT_LAYER, vec![MenuItem::close("Cancel")]));
        }

        let mut registry = Self { layers: flat };
        registry.link_parents();
        registry.validate();
        registry
    }

    pub fn root(&self) -> &MenuLayer {
        &self.layers[0]
    }

    pub fn get(&self, index: usize) -> Option<&MenuLayer> {
        self.layers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut MenuLayer> {
        self.layers.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuLayer> {
        self.layers.iter()
    }

    /// Index of the first layer named exactly `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == *name)
    }

    pub fn children_of(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let parent = self.layers.get(index).map(|l| l.name.clone());
        self.layers
            .iter()
            .enumerate()
            .filter(move |(_, l)| parent.is_some() && l.parent() == parent.as_ref())
            .map(|(i, _)| i)
    }

    /// Layers reached through another layer's items adopt it as their parent, unless they
    /// already have one.
    fn link_parents(&mut self) {
        let links: Vec<(usize, usize)> = self
            .layers
            .iter()
            .enumerate()
            .flat_map(|(from, layer)| {
                layer
                    .items()
                    .iter()
                    .filter_map(|item| item.target_layer())
                    .filter_map(|target| self.find(target))
                    .filter(move |&to| to != from)
                    .map(move |to| (from, to))
                    .collect::<Vec<_>>()
            })
            .collect();

        for (from, to) in links {
            if self.layers[to].parent().is_none() && to != 0 {
                let parent = self.layers[from].name.clone();
                self.layers[to].set_parent(parent);
            }
        }
    }

    fn validate(&self) {
        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.name.as_str()) {
                log::warn!(
                    "Duplicate menu layer '{}', only the first is reachable",
                    layer.name
                );
            }
            if layer.item_count() == 0 {
                log::warn!("Menu layer '{}' has no items", layer.name);
            }
            for target in layer.items().iter().filter_map(|i| i.target_layer()) {
                if self.find(target).is_none() {
                    log::warn!(
                        "Menu layer '{}' links to unknown layer '{}'",
                        layer.name,
                        target
                    );
                }
            }
        }
    }
}

fn flatten(mut layer: MenuLayer, out: &mut Vec<MenuLayer>) {
    let children = layer.take_children();
    out.push(layer);
    for child in children {
        flatten(child, out);
    }
}
