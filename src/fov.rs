use crate::grid::Grid;
use std::collections::HashMap;

/// Per-cell visibility fraction in `(0.0, 1.0]`. Cells that are absent are dark.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightMap {
    values: HashMap<(i32, i32), f32>,
}

impl LightMap {
    pub fn get(&self, x: i32, y: i32) -> f32 {
        self.values.get(&(x, y)).copied().unwrap_or(0.0)
    }

    pub fn is_lit(&self, x: i32, y: i32) -> bool {
        self.get(x, y) > 0.0
    }

    /// Keep the brightest value seen for a cell (octant edges are visited twice).
    fn light(&mut self, x: i32, y: i32, visibility: f32) {
        let entry = self.values.entry((x, y)).or_insert(0.0);
        if visibility > *entry {
            *entry = visibility;
        }
    }
}

/// Field of View calculator using recursive shadowcasting
///
/// The field is divided into 8 octants, each scanned row by row while
/// tracking which slopes are still lit. A cell's visibility is the fraction
/// of its angular span that falls inside the lit cone.
pub struct FOV;

impl FOV {
    /// Run shadowcasting from `(origin_x, origin_y)`. `is_transparent` decides
    /// which cells let light through; `emit` receives every lit cell once per
    /// octant that reaches it.
    pub fn compute<T, E>(origin_x: i32, origin_y: i32, radius: i32, is_transparent: T, mut emit: E)
    where
        T: Fn(i32, i32) -> bool,
        E: FnMut(i32, i32, f32),
    {
        puffin::profile_function!();

        // Origin is always fully visible
        emit(origin_x, origin_y, 1.0);

        let mut ctx = CastContext {
            origin_x,
            origin_y,
            radius,
            is_transparent: &is_transparent,
            emit: &mut emit,
        };
        for octant in 0..8 {
            cast_light(&mut ctx, 1, 1.0, 0.0, octant);
        }
    }
}

/// Compute the player-centered light map and mark every lit tile explored.
pub fn compute_light_map(center: (i32, i32), grid: &mut Grid, radius: i32) -> LightMap {
    let mut light_map = LightMap::default();
    let mut lit = Vec::new();

    {
        let grid_ref: &Grid = grid;
        FOV::compute(
            center.0,
            center.1,
            radius,
            |x, y| grid_ref.is_walkable(x, y),
            |x, y, visibility| {
                if visibility > 0.0 {
                    light_map.light(x, y, visibility);
                    lit.push((x, y));
                }
            },
        );
    }

    for (x, y) in lit {
        if let Some(tile) = grid.get_mut(x, y) {
            tile.explore();
        }
    }

    light_map
}

struct CastContext<'a, T, E> {
    origin_x: i32,
    origin_y: i32,
    radius: i32,
    is_transparent: &'a T,
    emit: &'a mut E,
}

/// Transform (row, col) coordinates based on octant to get (dx, dy)
///
/// Octants are numbered 0-7:
///   \1|2/
///   0\|/3
///   --@--
///   7/|\4
///   /6|5\
#[inline]
fn transform(octant: u8, row: i32, col: i32) -> (i32, i32) {
    match octant {
        0 => (-col, -row),
        1 => (-row, -col),
        2 => (-row, col),
        3 => (col, -row),
        4 => (col, row),
        5 => (row, col),
        6 => (row, -col),
        7 => (-col, row),
        _ => unreachable!(),
    }
}

/// Recursively cast light in one octant.
///
/// - `row`: current row being scanned (distance from origin)
/// - `start_slope`: slope of the upper edge of the lit area (1.0 = 45°)
/// - `end_slope`: slope of the lower edge of the lit area (0.0 = straight)
fn cast_light<T, E>(ctx: &mut CastContext<'_, T, E>, row: i32, mut start_slope: f32, end_slope: f32, octant: u8)
where
    T: Fn(i32, i32) -> bool,
    E: FnMut(i32, i32, f32),
{
    if start_slope < end_slope || row > ctx.radius {
        return;
    }

    let mut prev_blocked = false;
    let mut saved_start_slope = start_slope;

    let min_col = (row as f32 * end_slope).floor() as i32;
    let max_col = (row as f32 * start_slope).ceil() as i32;
    let radius_sq = i64::from(ctx.radius) * i64::from(ctx.radius);

    for col in (min_col..=max_col).rev() {
        let (dx, dy) = transform(octant, row, col);
        let x = ctx.origin_x + dx;
        let y = ctx.origin_y + dy;

        if i64::from(dx).pow(2) + i64::from(dy).pow(2) > radius_sq {
            continue;
        }

        let left_slope = (col as f32 + 0.5) / (row as f32 - 0.5);
        let right_slope = (col as f32 - 0.5) / (row as f32 + 0.5);

        if right_slope > start_slope {
            continue;
        }
        if left_slope < end_slope {
            break;
        }

        let overlap = left_slope.min(start_slope) - right_slope.max(end_slope);
        let visibility = (overlap / (left_slope - right_slope)).clamp(0.0, 1.0);
        if visibility > 0.0 {
            (ctx.emit)(x, y, visibility);
        }

        let is_blocked = !(ctx.is_transparent)(x, y);

        if prev_blocked {
            if is_blocked {
                saved_start_slope = right_slope;
            } else {
                prev_blocked = false;
                start_slope = saved_start_slope;
            }
        } else if is_blocked {
            // Entering shadow - recurse with the lit portion before this blocker
            prev_blocked = true;
            cast_light(ctx, row + 1, start_slope, left_slope, octant);
            saved_start_slope = right_slope;
        }
    }

    if !prev_blocked {
        cast_light(ctx, row + 1, start_slope, end_slope, octant);
    }
}
