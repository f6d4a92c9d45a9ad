//! Companion rendering on a background egui layer.
//!
//! The creatures are drawn from their segment chains each frame. Secondary
//! motion (wing flap, head nod, body bounce, eye sizing, glow) is derived
//! purely from elapsed time, behavior and creature index, so it carries no
//! state of its own.

use egui::epaint::PathShape;
use egui::{Color32, Id, LayerId, Order, Pos2, Rect, Shape, Stroke, Vec2 as EVec2};
use glam::Vec2;

use crate::behavior::Behavior;
use crate::creature::CreatureState;
use crate::theme::Theme;

/// Per-creature colors for the active theme and behavior
struct CreaturePalette {
    body: Color32,
    wing: Color32,
    belly: Color32,
    eye: Color32,
}

const PUPIL: Color32 = Color32::from_rgb(26, 26, 26);

fn palette(index: usize, behavior: Behavior, theme: Theme) -> CreaturePalette {
    let (body, wing, belly) = if theme.is_dark() {
        if index == 0 {
            (
                Color32::from_rgb(196, 181, 160),
                Color32::from_rgb(212, 197, 176),
                Color32::from_rgb(224, 213, 197),
            )
        } else {
            (
                Color32::from_rgb(143, 168, 184),
                Color32::from_rgb(160, 184, 200),
                Color32::from_rgb(176, 200, 216),
            )
        }
    } else if index == 0 {
        (
            Color32::from_rgb(42, 42, 42),
            Color32::from_rgb(58, 58, 58),
            Color32::from_rgb(74, 74, 74),
        )
    } else {
        (
            Color32::from_rgb(26, 58, 74),
            Color32::from_rgb(42, 74, 90),
            Color32::from_rgb(58, 90, 106),
        )
    };

    let eye = match behavior {
        Behavior::Celebrating => {
            if index == 0 {
                Color32::from_rgb(255, 234, 0)
            } else {
                Color32::from_rgb(124, 255, 0)
            }
        }
        Behavior::WatchingForm | Behavior::WatchingUser => {
            if index == 0 {
                Color32::from_rgb(255, 215, 0)
            } else {
                Color32::from_rgb(80, 250, 123)
            }
        }
        Behavior::Free => {
            if index == 0 {
                Color32::from_rgb(255, 193, 7)
            } else {
                Color32::from_rgb(0, 255, 136)
            }
        }
    };

    CreaturePalette {
        body,
        wing,
        belly,
        eye,
    }
}

/// Draw both companions behind the auth card
pub fn draw_companions(
    ctx: &egui::Context,
    creatures: &[CreatureState; 2],
    behavior: Behavior,
    now: f32,
    theme: Theme,
) {
    let painter = ctx.layer_painter(LayerId::new(Order::Background, Id::new("companions")));
    let screen = ctx.screen_rect();

    // Creature 0 is drawn last so it layers on top, like the original pair
    for index in [1, 0] {
        draw_creature(&painter, screen, &creatures[index], index, behavior, now, theme);
    }
}

fn draw_creature(
    painter: &egui::Painter,
    screen: Rect,
    creature: &CreatureState,
    index: usize,
    behavior: Behavior,
    now: f32,
    theme: Theme,
) {
    if creature.segments.len() < 8 {
        return;
    }

    let colors = palette(index, behavior, theme);
    let celebrating = behavior == Behavior::Celebrating;
    let watching = behavior.is_watching();

    // Secondary motion, stateless per frame
    let (flap_speed, flap_intensity) = if celebrating {
        (12.0, 0.6)
    } else if watching {
        (3.0, 0.3)
    } else {
        (5.0, 0.4)
    };
    let wing_flap = (now * flap_speed + index as f32 * std::f32::consts::PI).sin() * flap_intensity;
    let head_nod = if celebrating { (now * 8.0).sin() * 8.0 } else { 0.0 };
    let body_bounce = if celebrating {
        (now * 6.0).sin().abs() * 5.0
    } else {
        0.0
    };
    let lift = EVec2::new(0.0, -body_bounce);

    let to_px = |p: Vec2| -> Pos2 {
        Pos2::new(
            screen.min.x + p.x * screen.width(),
            screen.min.y + p.y * screen.height(),
        ) + lift
    };
    let points: Vec<Pos2> = creature.segments.iter().map(|&s| to_px(s)).collect();

    let head_angle = match creature.look_at {
        Some(look) if behavior != Behavior::Free => angle_between(points[0], to_px(look)),
        _ => angle_between(points[1], points[0]),
    };

    // Soft glow under the head when the creature is engaged
    if celebrating || watching {
        let glow_radius = if celebrating { 46.0 } else { 36.0 };
        painter.circle_filled(points[0], glow_radius, colors.eye.gamma_multiply(0.12));
    }

    draw_wings(painter, &points, colors.wing, colors.body, wing_flap);
    draw_body(painter, &points, &colors);
    draw_tail(painter, &points, colors.body);
    draw_head(
        painter,
        points[0],
        head_angle + head_nod.to_radians(),
        &colors,
        behavior,
        now,
        index,
    );
}

fn angle_between(from: Pos2, to: Pos2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Rotate a local offset and place it relative to `base`
fn place(base: Pos2, angle: f32, local: EVec2) -> Pos2 {
    let (sin, cos) = angle.sin_cos();
    Pos2::new(
        base.x + local.x * cos - local.y * sin,
        base.y + local.x * sin + local.y * cos,
    )
}

fn draw_body(painter: &egui::Painter, points: &[Pos2], colors: &CreaturePalette) {
    // Tapered spine strokes
    for i in 0..points.len() - 1 {
        let thickness = (22.0 - i as f32 * 0.4).max(3.0);
        painter.line_segment(
            [points[i], points[i + 1]],
            Stroke::new(thickness, colors.body),
        );
    }

    // Belly plates along the front half
    let belly = colors.belly.gamma_multiply(0.5);
    for i in (0..points.len().min(35)).step_by(2) {
        let next = points.get(i + 1).copied().unwrap_or(points[i]);
        let side = angle_between(points[i], next) + std::f32::consts::FRAC_PI_2;
        let offset = 10.0 - i as f32 * 0.2;
        let radius = (8.0 - i as f32 * 0.2).max(1.0);
        let center = Pos2::new(
            points[i].x + side.cos() * offset,
            points[i].y + side.sin() * offset,
        );
        painter.circle_filled(center, radius * 0.7, belly);
    }

    // Dorsal spines along the neck and back
    for i in (3..points.len().min(30)).step_by(2) {
        let ahead = points.get(i + 4).copied().unwrap_or(points[i]);
        let up = angle_between(points[i], ahead) - std::f32::consts::FRAC_PI_2;
        let length = 18.0 - i as f32 * 0.4;
        let tip = Pos2::new(
            points[i].x + up.cos() * length,
            points[i].y + up.sin() * length,
        );
        painter.line_segment([points[i], tip], Stroke::new(3.0, colors.body));
    }
}

fn draw_wings(
    painter: &egui::Painter,
    points: &[Pos2],
    wing_color: Color32,
    bone_color: Color32,
    flap: f32,
) {
    let base = points[6];
    let wing_angle = angle_between(points[7], points[6]);
    let membrane = wing_color.gamma_multiply(0.85);

    // Upper wing sweeps up as the lower sweeps down, and vice versa
    for (spread_deg, mirror) in [(-90.0 + flap * 25.0, 1.0f32), (90.0 - flap * 25.0, -1.0)] {
        let angle = wing_angle + spread_deg.to_radians();

        let tip = EVec2::new(-80.0, -120.0 * mirror);
        let mid = EVec2::new(-100.0, -80.0 * mirror);
        let low = EVec2::new(-110.0, -40.0 * mirror);
        let inner = EVec2::new(-20.0, -60.0 * mirror);
        let trailing = EVec2::new(-60.0, -20.0 * mirror);

        let a = base;
        let b = place(base, angle, inner);
        let c = place(base, angle, tip);
        let d = place(base, angle, trailing);

        painter.add(Shape::convex_polygon(vec![a, b, c], membrane, Stroke::NONE));
        painter.add(Shape::convex_polygon(vec![a, c, d], membrane, Stroke::NONE));

        // Wing bones
        for local in [tip, mid, low] {
            painter.line_segment([base, place(base, angle, local)], Stroke::new(2.0, bone_color));
        }
    }
}

fn draw_tail(painter: &egui::Painter, points: &[Pos2], color: Color32) {
    let tail = points[points.len() - 1];
    let angle = angle_between(points[points.len() - 3], tail);
    let fin = vec![
        tail,
        place(tail, angle, EVec2::new(25.0, -6.0)),
        place(tail, angle, EVec2::new(35.0, 0.0)),
        place(tail, angle, EVec2::new(25.0, 6.0)),
    ];
    painter.add(Shape::Path(PathShape::convex_polygon(
        fin,
        color,
        Stroke::NONE,
    )));
}

fn draw_head(
    painter: &egui::Painter,
    head: Pos2,
    angle: f32,
    colors: &CreaturePalette,
    behavior: Behavior,
    now: f32,
    index: usize,
) {
    let celebrating = behavior == Behavior::Celebrating;
    let watching = behavior.is_watching();

    // Skull and snout
    painter.circle_filled(place(head, angle, EVec2::new(10.0, 0.0)), 18.0, colors.body);
    painter.circle_filled(place(head, angle, EVec2::new(33.0, 0.0)), 10.0, colors.body);

    // Horns sweep back from the skull
    for side in [-1.0f32, 1.0] {
        let root = place(head, angle, EVec2::new(0.0, 16.0 * side));
        let tip = place(head, angle, EVec2::new(-22.0, 38.0 * side));
        painter.line_segment([root, tip], Stroke::new(5.0, colors.wing));
    }

    // Eyes pulse while engaged
    let eye_radius = if celebrating {
        11.0 + (now * 12.0 + index as f32).sin() * 1.5
    } else if watching {
        9.5 + (now * 3.0).sin()
    } else {
        7.0
    };
    let pupil_radius = if celebrating { 3.2 } else if watching { 4.6 } else { 4.0 };
    let highlight_radius = if celebrating {
        3.5 + (now * 14.0).sin().abs()
    } else if watching {
        3.0
    } else {
        2.0
    };

    for side in [-1.0f32, 1.0] {
        let eye = place(head, angle, EVec2::new(15.0, 10.0 * side));
        let pupil = place(head, angle, EVec2::new(17.0, 10.0 * side));
        let highlight = place(head, angle, EVec2::new(16.0, 10.0 * side - 1.0));
        painter.circle_filled(eye, eye_radius, colors.eye);
        painter.circle_filled(pupil, pupil_radius, PUPIL);
        painter.circle_filled(highlight, highlight_radius, Color32::WHITE);
    }

    // Nostrils at the snout tip
    for side in [-1.0f32, 1.0] {
        painter.circle_filled(place(head, angle, EVec2::new(41.0, 3.5 * side)), 2.5, PUPIL);
    }

    // A small grin while celebrating
    if celebrating {
        let from = place(head, angle, EVec2::new(28.0, 4.0));
        let via = place(head, angle, EVec2::new(36.0, 8.0));
        let to = place(head, angle, EVec2::new(43.0, 5.0));
        painter.line_segment([from, via], Stroke::new(2.0, PUPIL));
        painter.line_segment([via, to], Stroke::new(2.0, PUPIL));
    }
}
