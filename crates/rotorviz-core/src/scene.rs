//! Display-agnostic draw list emitted by the view renderers.
//!
//! A [`Scene`] is a flat list of colored primitives in viewport coordinates
//! (y growing downward, like the source datasets assume). Renderers assign
//! each primitive a paint depth; [`Scene::sort_by_depth`] produces painter's
//! order (largest depth first) with a stable sort so primitives pushed at
//! the same depth keep their insertion order. The TUI rasterizes the list;
//! tests inspect it directly.

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGB color with a [0, 1] opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

/// Fallback for unparseable hex strings (a neutral slate gray).
pub const FALLBACK_GRAY: Rgba = Rgba::new(0x94, 0xa3, 0xb8);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Parse `#rgb` or `#rrggbb`. Bad input yields [`FALLBACK_GRAY`] so a
    /// hand-edited dataset with a typo'd color still renders.
    pub fn from_hex(hex: &str) -> Self {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let full = match digits.len() {
            3 => {
                let mut s = String::with_capacity(6);
                for c in digits.chars() {
                    s.push(c);
                    s.push(c);
                }
                s
            }
            6 => digits.to_string(),
            _ => return FALLBACK_GRAY,
        };
        let parse = |range: std::ops::Range<usize>| u8::from_str_radix(&full[range], 16);
        match (parse(0..2), parse(2..4), parse(4..6)) {
            (Ok(r), Ok(g), Ok(b)) => Self::new(r, g, b),
            _ => FALLBACK_GRAY,
        }
    }

    pub fn faded(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Scale toward black; `factor` 1.0 is unchanged, 0.0 is black.
    pub fn darken(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: (self.r as f64 * f) as u8,
            g: (self.g as f64 * f) as u8,
            b: (self.b as f64 * f) as u8,
            alpha: self.alpha,
        }
    }

    /// Blend toward white; `factor` 0.0 is unchanged, 1.0 is white.
    pub fn lighten(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let lift = |c: u8| (c as f64 + (255.0 - c as f64) * f) as u8;
        Self {
            r: lift(self.r),
            g: lift(self.g),
            b: lift(self.b),
            alpha: self.alpha,
        }
    }
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Open stroked path.
    Polyline(Vec<(f64, f64)>),
    /// Closed path; `filled` on the primitive decides fill vs outline.
    Polygon(Vec<(f64, f64)>),
    Circle { cx: f64, cy: f64, r: f64 },
    Text { x: f64, y: f64, text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub color: Rgba,
    /// Paint depth; larger is farther and painted earlier.
    pub depth: f64,
    pub width: f64,
    pub dashed: bool,
    pub filled: bool,
}

impl Primitive {
    fn new(shape: Shape, color: Rgba) -> Self {
        Self {
            shape,
            color,
            depth: 0.0,
            width: 1.0,
            dashed: false,
            filled: false,
        }
    }

    pub fn polyline(points: Vec<(f64, f64)>, color: Rgba) -> Self {
        Self::new(Shape::Polyline(points), color)
    }

    pub fn polygon(points: Vec<(f64, f64)>, color: Rgba) -> Self {
        Self::new(Shape::Polygon(points), color)
    }

    pub fn circle(cx: f64, cy: f64, r: f64, color: Rgba) -> Self {
        Self::new(Shape::Circle { cx, cy, r }, color)
    }

    pub fn text(x: f64, y: f64, text: impl Into<String>, color: Rgba) -> Self {
        Self::new(
            Shape::Text {
                x,
                y,
                text: text.into(),
            },
            color,
        )
    }

    pub fn at_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn filled(mut self) -> Self {
        self.filled = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Painter's order: farthest (largest depth) first, stable within equal
    /// depths.
    pub fn sort_by_depth(&mut self) {
        self.primitives
            .sort_by(|a, b| b.depth.total_cmp(&a.depth));
    }

    /// Fold another scene in as an inset: points scaled and offset, depths
    /// shifted by `depth_bias` so whole scenes layer over each other.
    pub fn absorb(&mut self, other: Scene, scale: f64, offset: (f64, f64), depth_bias: f64) {
        for mut prim in other.primitives {
            let map = |(x, y): (f64, f64)| (x * scale + offset.0, y * scale + offset.1);
            prim.shape = match prim.shape {
                Shape::Polyline(pts) => Shape::Polyline(pts.into_iter().map(map).collect()),
                Shape::Polygon(pts) => Shape::Polygon(pts.into_iter().map(map).collect()),
                Shape::Circle { cx, cy, r } => {
                    let (cx, cy) = map((cx, cy));
                    Shape::Circle { cx, cy, r: r * scale }
                }
                Shape::Text { x, y, text } => {
                    let (x, y) = map((x, y));
                    Shape::Text { x, y, text }
                }
            };
            prim.depth += depth_bias;
            self.primitives.push(prim);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse_six_digits() {
        let c = Rgba::from_hex("#22d3ee");
        assert_eq!((c.r, c.g, c.b), (0x22, 0xd3, 0xee));
        assert_eq!(c.alpha, 1.0);
    }

    #[test]
    fn test_hex_parse_three_digits_expands() {
        let c = Rgba::from_hex("#fa0");
        assert_eq!((c.r, c.g, c.b), (0xff, 0xaa, 0x00));
    }

    #[test]
    fn test_hex_parse_bad_input_falls_back_to_gray() {
        assert_eq!(Rgba::from_hex("not-a-color"), FALLBACK_GRAY);
        assert_eq!(Rgba::from_hex("#12"), FALLBACK_GRAY);
        assert_eq!(Rgba::from_hex("#zzzzzz"), FALLBACK_GRAY);
    }

    #[test]
    fn test_sort_by_depth_is_back_to_front_and_stable() {
        let mut scene = Scene::new(100.0, 100.0);
        let red = Rgba::new(255, 0, 0);
        scene.push(Primitive::circle(0.0, 0.0, 1.0, red).at_depth(1.0));
        scene.push(Primitive::text(0.0, 0.0, "first-at-5", red).at_depth(5.0));
        scene.push(Primitive::text(0.0, 0.0, "second-at-5", red).at_depth(5.0));
        scene.push(Primitive::circle(0.0, 0.0, 2.0, red).at_depth(9.0));
        scene.sort_by_depth();

        let depths: Vec<f64> = scene.primitives().iter().map(|p| p.depth).collect();
        assert_eq!(depths, vec![9.0, 5.0, 5.0, 1.0]);
        // Stable: equal-depth texts keep insertion order.
        match (&scene.primitives()[1].shape, &scene.primitives()[2].shape) {
            (Shape::Text { text: a, .. }, Shape::Text { text: b, .. }) => {
                assert_eq!(a, "first-at-5");
                assert_eq!(b, "second-at-5");
            }
            other => panic!("unexpected shapes {other:?}"),
        }
    }

    #[test]
    fn test_absorb_scales_and_offsets_inset() {
        let mut inset = Scene::new(600.0, 600.0);
        inset.push(Primitive::circle(300.0, 300.0, 100.0, FALLBACK_GRAY).at_depth(2.0));
        let mut base = Scene::new(1200.0, 900.0);
        base.absorb(inset, 0.5, (10.0, 20.0), 1000.0);

        match base.primitives()[0].shape {
            Shape::Circle { cx, cy, r } => {
                assert_eq!((cx, cy), (160.0, 170.0));
                assert_eq!(r, 50.0);
            }
            ref other => panic!("unexpected shape {other:?}"),
        }
        assert_eq!(base.primitives()[0].depth, 1002.0);
    }

    #[test]
    fn test_darken_and_lighten_bounds() {
        let c = Rgba::new(100, 200, 50);
        let dark = c.darken(0.5);
        assert_eq!((dark.r, dark.g, dark.b), (50, 100, 25));
        let light = c.lighten(1.0);
        assert_eq!((light.r, light.g, light.b), (255, 255, 255));
    }
}
