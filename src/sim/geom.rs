//! Rectangle and triangle collision primitives
//!
//! Rotation-aware collision works on 4-corner point sets: each quadrilateral
//! is split into two triangles along the 0-2 diagonal and overlap is declared
//! when any vertex of one shape lies inside a triangle of the other. This is
//! a conservative vertex-containment test, not exact SAT: two convex shapes
//! that overlap only in a region containing no vertex of either (a pure
//! edge crossing) are missed. Projectile hitboxes are long and thin, so a
//! crossing always places one of their corners inside the other shape.

use glam::Vec2;

/// Point-in-triangle via the barycentric sign technique, boundary inclusive.
/// Handles both clockwise and counter-clockwise windings by branching on the
/// signed area.
pub fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let s = a.y * c.x - a.x * c.y + (c.y - a.y) * p.x + (a.x - c.x) * p.y;
    let t = a.x * b.y - a.y * b.x + (a.y - b.y) * p.x + (b.x - a.x) * p.y;

    if (s < 0.0) != (t < 0.0) {
        return false;
    }

    let area = -b.y * c.x + a.y * (c.x - b.x) + a.x * (b.y - c.y) + b.x * c.y;
    if area < 0.0 {
        s <= 0.0 && s + t >= area
    } else {
        s >= 0.0 && s + t <= area
    }
}

/// Split a quadrilateral into its two diagonal triangles
#[inline]
fn triangles(q: &[Vec2; 4]) -> [[Vec2; 3]; 2] {
    [[q[0], q[1], q[2]], [q[0], q[2], q[3]]]
}

/// Overlap test between two convex quadrilaterals given as corner sets.
///
/// Returns true iff some vertex of either quad lies inside a triangle of the
/// other. See the module docs for the known edge-crossing approximation.
pub fn corners_overlap(a: &[Vec2; 4], b: &[Vec2; 4]) -> bool {
    for ta in &triangles(a) {
        for tb in &triangles(b) {
            if ta
                .iter()
                .any(|&v| point_in_triangle(v, tb[0], tb[1], tb[2]))
                || tb
                    .iter()
                    .any(|&v| point_in_triangle(v, ta[0], ta[1], ta[2]))
            {
                return true;
            }
        }
    }
    false
}

/// Point inside a rotated rectangle given as a corner set
pub fn point_in_corners(p: Vec2, corners: &[Vec2; 4]) -> bool {
    let [t0, t1] = triangles(corners);
    point_in_triangle(p, t0[0], t0[1], t0[2]) || point_in_triangle(p, t1[0], t1[1], t1[2])
}

/// Corners of a rectangle centered at `center`, rotated by `angle_deg`,
/// clockwise from the local top-left. Recompute from the latest position and
/// angle before every use; corner sets are never cached across updates.
pub fn rotated_corners(center: Vec2, size: Vec2, angle_deg: f32) -> [Vec2; 4] {
    let half = size / 2.0;
    let rot = Vec2::from_angle(angle_deg.to_radians());
    let local = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ];
    local.map(|corner| center + rot.rotate(corner))
}

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Corners in clockwise order from the top-left
    pub fn corners(&self) -> [Vec2; 4] {
        let Vec2 { x, y } = self.pos;
        let Vec2 { x: w, y: h } = self.size;
        [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ]
    }

    /// Axis-aligned overlap test (boundary touching counts as overlap)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x <= other.pos.x + other.size.x
            && self.pos.x + self.size.x >= other.pos.x
            && self.pos.y <= other.pos.y + other.size.y
            && self.pos.y + self.size.y >= other.pos.y
    }

    /// Overlap against a rotated corner set, computing own corners on the fly
    pub fn overlaps_corners(&self, corners: &[Vec2; 4]) -> bool {
        corners_overlap(&self.corners(), corners)
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        point_in_corners(p, &self.corners())
    }
}
