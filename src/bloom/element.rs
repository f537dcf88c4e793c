// Decorative flower placed during the bloom stage.
use crate::rng::UnitRng;

pub const X_RANGE: (f64, f64) = (0.0, 100.0); // percent of viewport width
pub const Y_RANGE: (f64, f64) = (5.0, 100.0); // percent of viewport height
pub const DELAY_RANGE_S: (f64, f64) = (0.0, 0.35);
pub const DURATION_RANGE_S: (f64, f64) = (3.0, 8.0);
pub const ROTATION_RANGE_DEG: (f64, f64) = (-20.0, 20.0);

/// One randomly parametrized flower. Never mutated after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorativeElement {
    pub id: u32,
    pub x: f64,            // left, percent
    pub y: f64,            // top, percent
    pub size: f64,         // scale factor, grows toward the bottom of the screen
    pub delay_s: f64,      // animation-delay
    pub duration_s: f64,   // animation-duration
    pub rotation_deg: f64, // tilt
}

fn lerp((lo, hi): (f64, f64), u: f64) -> f64 {
    lo + (hi - lo) * u
}

/// Scale for a flower planted at `y` percent: 0.3 at the top edge, 1.5 at the bottom.
pub fn size_for_y(y: f64) -> f64 {
    (y / 100.0) * 1.2 + 0.3
}

impl DecorativeElement {
    pub fn random(id: u32, rng: &mut impl UnitRng) -> Self {
        // Draw order matters for reproducible seeds: y first, then the rest.
        let y = lerp(Y_RANGE, rng.next_unit());
        Self {
            id,
            x: lerp(X_RANGE, rng.next_unit()),
            y,
            size: size_for_y(y),
            delay_s: lerp(DELAY_RANGE_S, rng.next_unit()),
            duration_s: lerp(DURATION_RANGE_S, rng.next_unit()),
            rotation_deg: lerp(ROTATION_RANGE_DEG, rng.next_unit()),
        }
    }

    /// Paint order: larger (lower) flowers cover smaller ones.
    pub fn z_index(&self) -> i32 {
        (self.size * 100.0).floor() as i32
    }

    /// Inline style positioning the flower's 80x200 box, anchored at its stem base.
    pub fn style(&self) -> String {
        format!(
            "left:{:.3}%; top:{:.3}%; width:80px; height:200px; animation-delay:{:.3}s; animation-duration:{:.3}s; transform:scale({:.4}) rotate({:.3}deg) translate(-50%,-100%); z-index:{};",
            self.x,
            self.y,
            self.delay_s,
            self.duration_s,
            self.size,
            self.rotation_deg,
            self.z_index()
        )
    }
}
