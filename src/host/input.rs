//! Pointer input: from a click in window pixels to a flip request.
//!
//! ```text
//! client (px, y down) --Viewport--> NDC (-1..1, y up) --Camera--> table plane --pick_card--> CardId
//! ```

use crate::cards::{Card, Position};
use crate::core::config::TableLayout;
use crate::core::entity::CardId;
use crate::rules::FlipOutcome;
use crate::session::SessionController;

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height. A degenerate viewport reports 1.0.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Convert client pixels to normalized device coordinates.
    #[must_use]
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> (f32, f32) {
        let width = self.width.max(1.0);
        let height = self.height.max(1.0);
        ((client_x / width) * 2.0 - 1.0, -(client_y / height) * 2.0 + 1.0)
    }
}

/// Perspective camera looking straight at the table from +z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub fov_y_degrees: f32,
    /// Distance from the camera to the table plane.
    pub distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            distance: 5.0,
        }
    }
}

impl Camera {
    /// Half the visible height of the table plane.
    #[must_use]
    pub fn half_height(&self) -> f32 {
        (self.fov_y_degrees.to_radians() / 2.0).tan() * self.distance
    }

    /// Point on the table plane under `ndc`.
    #[must_use]
    pub fn unproject(&self, ndc: (f32, f32), aspect: f32) -> Position {
        let half_height = self.half_height();
        Position::new(ndc.0 * half_height * aspect, ndc.1 * half_height)
    }
}

/// Card whose rectangle contains `point`.
pub fn pick_card<'a>(
    cards: impl IntoIterator<Item = &'a Card>,
    point: Position,
    table: &TableLayout,
) -> Option<CardId> {
    let half_w = table.card_width / 2.0;
    let half_h = table.card_height / 2.0;

    cards
        .into_iter()
        .find(|card| (point.x - card.position.x).abs() <= half_w && (point.y - card.position.y).abs() <= half_h)
        .map(|card| card.id)
}

/// Translates pointer clicks into flips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputDispatcher {
    pub viewport: Viewport,
    pub camera: Camera,
}

impl InputDispatcher {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            camera: Camera::default(),
        }
    }

    /// Follow a window resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Table point under a client pixel.
    #[must_use]
    pub fn world_point(&self, client_x: f32, client_y: f32) -> Position {
        let ndc = self.viewport.to_ndc(client_x, client_y);
        self.camera.unproject(ndc, self.viewport.aspect())
    }

    /// Card under a client pixel.
    #[must_use]
    pub fn pick(&self, session: &SessionController, client_x: f32, client_y: f32) -> Option<CardId> {
        let point = self.world_point(client_x, client_y);
        pick_card(session.state().cards.iter(), point, &session.config().table)
    }

    /// Flip the card under a click. Clicks on empty table do nothing.
    pub fn dispatch(&self, session: &mut SessionController, client_x: f32, client_y: f32) -> Option<FlipOutcome> {
        let card = self.pick(session, client_x, client_y)?;
        Some(session.click(card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_ndc_corners() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.to_ndc(0.0, 0.0), (-1.0, 1.0));
        assert_eq!(viewport.to_ndc(800.0, 600.0), (1.0, -1.0));
        assert_eq!(viewport.to_ndc(400.0, 300.0), (0.0, 0.0));
    }

    #[test]
    fn test_degenerate_viewport() {
        let viewport = Viewport::new(0.0, 0.0);
        assert_eq!(viewport.aspect(), 1.0);
        let (x, y) = viewport.to_ndc(0.0, 0.0);
        assert!(x.is_finite() && y.is_finite());
    }

    #[test]
    fn test_unproject() {
        let camera = Camera::default();
        // tan(37.5deg) * 5
        assert!(approx(camera.half_height(), 3.8366));

        let center = camera.unproject((0.0, 0.0), 1.5);
        assert_eq!(center, Position::new(0.0, 0.0));

        let corner = camera.unproject((1.0, 1.0), 2.0);
        assert!(approx(corner.x, camera.half_height() * 2.0));
        assert!(approx(corner.y, camera.half_height()));
    }

    #[test]
    fn test_pick_card() {
        let table = TableLayout::default();
        let cards = vec![
            Card::new(CardId::new(0), 1, Position::new(-0.75, 0.0)),
            Card::new(CardId::new(1), 1, Position::new(0.75, 0.0)),
        ];

        assert_eq!(pick_card(&cards, Position::new(-0.75, 0.7), &table), Some(CardId::new(0)));
        assert_eq!(pick_card(&cards, Position::new(1.2, -0.7), &table), Some(CardId::new(1)));
        // Gap between the two cards
        assert_eq!(pick_card(&cards, Position::new(0.0, 0.0), &table), None);
        assert_eq!(pick_card(&cards, Position::new(0.75, 0.8), &table), None);
    }

    #[test]
    fn test_resize() {
        let mut input = InputDispatcher::new(Viewport::new(100.0, 100.0));
        input.resize(200.0, 100.0);
        assert_eq!(input.viewport.aspect(), 2.0);
    }
}
