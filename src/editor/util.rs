/// Axis-aligned bounds `(min_x, min_y, max_x, max_y)` of a vertex list.
pub(crate) fn bounds(vertices: &[(f32, f32)]) -> Option<(f32, f32, f32, f32)> {
    let (&(x0, y0), rest) = vertices.split_first()?;
    let mut b = (x0, y0, x0, y0);
    for &(x, y) in rest {
        b.0 = b.0.min(x);
        b.1 = b.1.min(y);
        b.2 = b.2.max(x);
        b.3 = b.3.max(y);
    }
    Some(b)
}

#[inline]
pub(crate) fn squared_euclidean(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

/// Even-odd ray casting test.
///
/// The polygon is implicitly closed (last vertex connects back to the first).
/// Fewer than three vertices never contain anything.
pub(crate) fn point_in_polygon(point: (f32, f32), polygon: &[(f32, f32)]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let (px, py) = point;
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}
