use super::geometry::{self, GuideRings, HitTest, Plane};
use super::item::{ItemAction, LayerName};
use super::layer::MenuLayer;
use super::registry::LayerRegistry;
use super::theme::ThemeColors;
use super::view::{self, MenuFrame};
use crate::config::MenuTuning;
use glam::Vec3;
use handkit::{AudioSink, HandSnapshot, Handed, InputFrame, Pose, Renderer, Sound, Stepper};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum MenuState {
    #[default]
    Idle,
    /// A palm faces the head; the grip hint is showing.
    Indicating,
    Open,
}

/// One radial menu. All interaction state lives here, so several can run side by side.
pub struct RadialController {
    registry: LayerRegistry,
    tuning: MenuTuning,
    colors: ThemeColors,
    rings: GuideRings,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioSink>,

    enabled: bool,
    state: MenuState,
    active_hand: Option<Handed>,
    active_layer: usize,
    nav_stack: Vec<usize>,
    current_pose: Pose,
    dest_pose: Pose,
    activation: f32,
    menu_scale: f32,
    angle_offset: f32,
    head: Pose,
}

impl RadialController {
    pub fn new(
        layers: Vec<MenuLayer>,
        tuning: MenuTuning,
        renderer: Box<dyn Renderer>,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        let rings = GuideRings::new(&tuning);
        let menu_scale = tuning.min_menu_scale;
        Self {
            registry: LayerRegistry::new(layers),
            tuning,
            colors: ThemeColors::default(),
            rings,
            renderer,
            audio,
            enabled: true,
            state: MenuState::Idle,
            active_hand: None,
            active_layer: 0,
            nav_stack: Vec::new(),
            current_pose: Pose::IDENTITY,
            dest_pose: Pose::IDENTITY,
            activation: 0.0,
            menu_scale,
            angle_offset: 0.0,
            head: Pose::IDENTITY,
        }
    }

    pub fn with_colors(mut self, colors: ThemeColors) -> Self {
        self.colors = colors;
        self
    }

    /// A disabled menu closes and ignores frames until re-enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.close();
            self.state = MenuState::Idle;
            self.active_hand = None;
        }
        self.enabled = enabled;
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn active_hand(&self) -> Option<Handed> {
        self.active_hand
    }

    pub fn active_layer_index(&self) -> usize {
        self.active_layer
    }

    pub fn active_layer(&self) -> &MenuLayer {
        self.registry
            .get(self.active_layer)
            .unwrap_or_else(|| self.registry.root())
    }

    pub fn navigation_stack(&self) -> &[usize] {
        &self.nav_stack
    }

    pub fn activation(&self) -> f32 {
        self.activation
    }

    pub fn menu_scale(&self) -> f32 {
        self.menu_scale
    }

    pub fn angle_offset(&self) -> f32 {
        self.angle_offset
    }

    pub fn current_pose(&self) -> &Pose {
        &self.current_pose
    }

    pub fn destination_pose(&self) -> &Pose {
        &self.dest_pose
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn tuning(&self) -> &MenuTuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: MenuTuning) {
        self.rings = GuideRings::new(&tuning);
        self.tuning = tuning;
    }

    /// Centre of sector `index` of the active layer, in menu-plane degrees.
    pub fn sector_angle(&self, index: usize) -> Option<f32> {
        let layer = self.active_layer();
        (index < layer.item_count()).then(|| {
            geometry::normalize_degrees(geometry::sector_center(
                index,
                layer.item_count(),
                layer.start_angle + self.angle_offset,
            ))
        })
    }

    /// Opens the root layer at `at`, facing the last known head position.
    pub fn show(&mut self, at: Vec3) {
        if self.state == MenuState::Open {
            self.close();
        }
        self.audio.play(Sound::Click, at);

        if self.state != MenuState::Indicating {
            // nothing to grow out of, so start in place
            self.current_pose = Pose::look_at(at, self.head.position);
        }
        self.dest_pose = Pose::look_at(at, self.head.position);
        self.active_layer = 0;
        self.state = MenuState::Open;
        log::debug!("Menu opened at {}", at);
    }

    /// Resets all interaction state. Does nothing if the menu is not open.
    pub fn close(&mut self) {
        if self.state != MenuState::Open {
            return;
        }
        self.audio.play(Sound::Unclick, self.current_pose.position);
        self.activation = 0.0;
        self.menu_scale = self.tuning.min_menu_scale;
        self.angle_offset = 0.0;
        self.nav_stack.clear();
        self.active_layer = 0;
        self.active_hand = None;
        self.state = MenuState::Idle;
        log::debug!("Menu closed");
    }

    fn step_frame(&mut self, input: &InputFrame) {
        self.head = input.head;
        match self.state {
            MenuState::Idle | MenuState::Indicating => self.step_indicator(input),
            MenuState::Open => self.step_menu(input),
        }
    }

    fn step_indicator(&mut self, input: &InputFrame) {
        let candidates = self.tuning.hand.candidates();
        let tracked: Vec<Handed> = candidates
            .iter()
            .copied()
            .filter(|&h| input.hand(h).tracked)
            .collect();

        // nothing to look at, leave everything as it was
        if tracked.is_empty() {
            return;
        }

        let Some(handed) = tracked
            .into_iter()
            .find(|&h| self.is_presenting(input.hand(h), &input.head))
        else {
            self.state = MenuState::Idle;
            self.active_hand = None;
            return;
        };

        let hand = input.hand(handed);
        if self.state == MenuState::Idle {
            log::debug!("{} palm facing head", handed);
        }
        self.state = MenuState::Indicating;
        self.active_hand = Some(handed);
        self.current_pose = hand.palm;

        view::draw_indicator(
            &hand.palm,
            hand.grip_activation,
            &self.tuning,
            &self.rings,
            &self.colors,
            self.renderer.as_mut(),
        );

        if hand.just_gripped {
            self.show(hand.index_tip);
        }
    }

    fn is_presenting(&self, hand: &HandSnapshot, head: &Pose) -> bool {
        if let Some(cone) = self.tuning.view_cone {
            let to_hand = (hand.palm.position - head.position).normalize_or_zero();
            if head.forward().dot(to_hand) <= cone {
                return false;
            }
        }
        hand.palm_facing(head.position) > self.tuning.palm_facing_threshold
    }

    fn menu_hand(&mut self, input: &InputFrame) -> Option<Handed> {
        if self.active_hand.is_none() {
            // opened by the host, latch onto whichever allowed hand shows up first
            self.active_hand = self
                .tuning
                .hand
                .candidates()
                .iter()
                .copied()
                .find(|&h| input.hand(h).tracked);
        }
        self.active_hand
    }

    fn step_menu(&mut self, input: &InputFrame) {
        let Some(handed) = self.menu_hand(input) else {
            return;
        };
        let hand = *input.hand(handed);
        if !hand.tracked {
            return;
        }

        let t = (input.elapsed * self.tuning.smoothing_rate).clamp(0.0, 1.0);
        self.current_pose = self.current_pose.approach(&self.dest_pose, t);
        self.activation += (1.0 - self.activation) * t;
        self.menu_scale += (1.0 - self.menu_scale) * t;

        let tip_local = self.current_pose.to_local(hand.index_tip);
        let hit = HitTest::classify(tip_local, &self.tuning);
        let layer = self
            .registry
            .get(self.active_layer)
            .unwrap_or_else(|| self.registry.root());
        let count = layer.item_count();
        let angle_base = layer.start_angle + self.angle_offset;
        let sector = geometry::sector_at(hit.angle, angle_base, count);
        let settled = self.activation >= self.tuning.activation_threshold;

        let frame = MenuFrame {
            layer,
            transform: self.current_pose.to_matrix(self.menu_scale),
            hit,
            tip_local,
            focused_sector: sector.filter(|_| hit.focused && settled),
            angle_base,
            tuning: &self.tuning,
            rings: &self.rings,
        };
        view::draw_menu(&frame, &self.colors, self.renderer.as_mut());

        // values are unreliable while still animating into place
        if !settled {
            return;
        }

        if let Some(sector) = sector.filter(|_| hit.selected) {
            let from_angle =
                geometry::normalize_degrees(geometry::sector_center(sector, count, angle_base));
            self.select_item(sector, hand.index_tip, from_angle);
        }
        // an on-plane tip past the outer ring applies the item, then dismisses
        if hit.cancel {
            self.close();
        }
    }

    fn select_item(&mut self, sector: usize, at: Vec3, from_angle: f32) {
        let layer_index = self.active_layer;
        let Some(item) = self
            .registry
            .get(layer_index)
            .and_then(|l| l.items().get(sector))
        else {
            return;
        };
        log::debug!("Selected '{}'", item.name);

        match item.action.clone() {
            ItemAction::Close => self.close(),
            ItemAction::Layer(target) => {
                self.audio.play(Sound::Click, self.current_pose.position);
                if self.select_layer(&target) {
                    self.reposition(at, from_angle);
                }
            }
            ItemAction::Back => {
                self.audio.play(Sound::Unclick, self.current_pose.position);
                if let Some(previous) = self.nav_stack.pop() {
                    self.active_layer = previous;
                }
                self.reposition(at, from_angle);
            }
        }

        if let Some(item) = self
            .registry
            .get_mut(layer_index)
            .and_then(|l| l.items_mut().get_mut(sector))
        {
            item.invoke();
        }
    }

    /// Moves into `name`. An unknown name leaves the menu on the current layer.
    fn select_layer(&mut self, name: &LayerName) -> bool {
        match self.registry.find(name) {
            Some(index) => {
                self.nav_stack.push(self.active_layer);
                self.active_layer = index;
                true
            }
            None => {
                log::error!("Couldn't find hand menu layer named {}!", name);
                false
            }
        }
    }

    /// Re-centres the menu under the fingertip and turns the new layer so its back item
    /// faces where the finger came from.
    fn reposition(&mut self, at: Vec3, from_angle: f32) {
        let plane = Plane::new(self.current_pose.position, self.current_pose.forward());
        self.dest_pose.position = plane.closest(at);
        self.activation = 0.0;

        let back_angle = self.active_layer().back_angle();
        self.angle_offset = if back_angle != 0.0 {
            geometry::normalize_degrees(from_angle - back_angle + 180.0)
        } else {
            0.0
        };
    }
}

impl Stepper for RadialController {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn step(&mut self, input: &InputFrame) {
        self.step_frame(input);
    }

    fn shutdown(&mut self) {
        self.close();
    }
}
