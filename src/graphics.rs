use macroquad::prelude::*;
use shorelark::simulation::world::World;

const FOOD_RADIUS: f32 = 3.0;
const ANIMAL_RADIUS: f32 = 5.0;
const VISION_LENGTH: f32 = 20.0;
/// Half the angular width of a drawn vision cone, in radians.
const VISION_HALF_WIDTH: f32 = 0.1;

const BACKGROUND_COLOR: Color = Color::new(0.06, 0.09, 0.16, 1.0);
const FOOD_COLOR: Color = Color::new(0.13, 0.77, 0.37, 1.0);
const ANIMAL_COLOR: Color = Color::new(0.94, 0.27, 0.27, 1.0);
const VISION_COLOR: Color = Color::new(0.23, 0.51, 0.96, 0.5);

/// Maps world coordinates into a screen rectangle, keeping the aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    origin: Vec2,
    scale: f32,
    size: Vec2,
}

impl Viewport {
    /// Fits a `world` sized arena into `area`, centered.
    pub fn fit(world: &World, area: Rect) -> Self {
        let scale = (area.w / world.width).min(area.h / world.height).max(0.0);
        let size = vec2(world.width * scale, world.height * scale);
        let origin = vec2(
            area.x + (area.w - size.x) / 2.0,
            area.y + (area.h - size.y) / 2.0,
        );
        Self {
            origin,
            scale,
            size,
        }
    }
}

trait ToScreen {
    type Output;
    fn to_screen(&self, viewport: &Viewport) -> Self::Output;
}

impl ToScreen for [f32; 2] {
    type Output = Vec2;
    fn to_screen(&self, viewport: &Viewport) -> Vec2 {
        viewport.origin + vec2(self[0], self[1]) * viewport.scale
    }
}

impl ToScreen for f32 {
    type Output = f32;
    fn to_screen(&self, viewport: &Viewport) -> f32 {
        self * viewport.scale
    }
}

/// Draws the arena background, food and animals.
pub fn draw_world(world: &World, viewport: &Viewport) {
    draw_rectangle(
        viewport.origin.x,
        viewport.origin.y,
        viewport.size.x,
        viewport.size.y,
        BACKGROUND_COLOR,
    );
    draw_food(world, viewport);
    draw_animals(world, viewport);
}

fn draw_food(world: &World, viewport: &Viewport) {
    let radius = FOOD_RADIUS.to_screen(viewport);
    world.food.iter().for_each(|food| {
        let screen_pos = food.pos().to_screen(viewport);
        draw_circle(screen_pos.x, screen_pos.y, radius, FOOD_COLOR);
    });
}

fn draw_animals(world: &World, viewport: &Viewport) {
    let radius = ANIMAL_RADIUS.to_screen(viewport);
    let vision_length = VISION_LENGTH.to_screen(viewport);

    world.animals.iter().for_each(|animal| {
        let screen_pos = animal.pos().to_screen(viewport);

        // vision cones, one per sector, scaled by its reading
        for (i, &strength) in animal.vision.iter().enumerate() {
            if strength <= 0.0 {
                continue;
            }
            let angle = animal.sector_angle(i);
            let length = vision_length * strength;
            let left = screen_pos + Vec2::from_angle(angle - VISION_HALF_WIDTH) * length;
            let right = screen_pos + Vec2::from_angle(angle + VISION_HALF_WIDTH) * length;
            draw_triangle(screen_pos, left, right, VISION_COLOR);
        }

        draw_circle(screen_pos.x, screen_pos.y, radius, ANIMAL_COLOR);

        // heading indicator
        let tip = screen_pos + Vec2::from_angle(animal.rotation) * radius;
        draw_line(screen_pos.x, screen_pos.y, tip.x, tip.y, 2.0, WHITE);
    });
}
