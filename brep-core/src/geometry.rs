/// Geometry primitives: bounds and point helpers
use nalgebra::{Matrix4, Point3, Vector3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Zero-sized box at a single point.
    pub fn point(p: Point3<f64>) -> Self {
        Self { min: p, max: p }
    }

    /// Tightest box around the given points, or `None` when there are none.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::point(first), |mut acc, p| {
            acc.min = acc.min.inf(p);
            acc.max = acc.max.sup(p);
            acc
        }))
    }

    /// Minimum corner, the box's reference location.
    pub fn location(&self) -> Point3<f64> {
        self.min
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounds of this box after mapping all eight corners through `matrix`.
    pub fn transform(&self, matrix: &Matrix4<f64>) -> Self {
        let corners = self.corners().map(|c| matrix.transform_point(&c));
        // Eight corners, never empty.
        Self::from_points(corners.iter()).unwrap_or(*self)
    }
}

/// Arithmetic mean of a set of points. The origin for an empty set.
pub fn centroid<I>(points: I) -> Point3<f64>
where
    I: IntoIterator<Item = Point3<f64>>,
{
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    if count == 0 {
        return Point3::origin();
    }
    Point3::from(sum / count as f64)
}

/// Unnormalized normal of the corner `v1 -> v2 -> v3`.
pub fn corner_normal(v1: &Point3<f64>, v2: &Point3<f64>, v3: &Point3<f64>) -> Vector3<f64> {
    (v2 - v1).cross(&(v3 - v2))
}
