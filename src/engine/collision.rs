//! Contact detection and response for axis-aligned rectangles and circles
//!
//! All normals point from the second body toward the first, so pushing the
//! first body along `normal * penetration` separates the pair.

use glam::Vec2;

use super::Shape;

/// Contact distance tolerance; keeps resting contacts from flickering on and off
pub const CONTACT_SLOP: f32 = 0.05;

/// Result of a contact test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Contact point on the second body's surface
    pub point: Vec2,
    /// Unit normal pointing toward the first body
    pub normal: Vec2,
    /// Overlap depth; may be slightly negative inside the slop band
    pub penetration: f32,
}

/// Circle at `center` against a rectangle at `rect_center` with `half` extents
pub fn circle_rect(center: Vec2, radius: f32, rect_center: Vec2, half: Vec2) -> Option<Contact> {
    let local = center - rect_center;
    let clamped = local.clamp(-half, half);

    if clamped == local {
        // Center inside the rectangle - exit through the nearest face
        let gap = half - local.abs();
        let normal = if gap.x < gap.y {
            Vec2::new(local.x.signum(), 0.0)
        } else {
            Vec2::new(0.0, local.y.signum())
        };
        return Some(Contact {
            point: rect_center + clamped,
            normal,
            penetration: radius + gap.x.min(gap.y),
        });
    }

    let offset = local - clamped;
    let dist = offset.length();
    if dist >= radius + CONTACT_SLOP {
        return None;
    }

    Some(Contact {
        point: rect_center + clamped,
        normal: offset / dist,
        penetration: radius - dist,
    })
}

/// Rectangle against rectangle, separating along the axis of least overlap
pub fn rect_rect(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> Option<Contact> {
    let delta = a_center - b_center;
    let overlap = (a_half + b_half) - delta.abs();
    if overlap.x <= -CONTACT_SLOP || overlap.y <= -CONTACT_SLOP {
        return None;
    }

    let (normal, penetration) = if overlap.x < overlap.y {
        (Vec2::new(sign(delta.x), 0.0), overlap.x)
    } else {
        (Vec2::new(0.0, sign(delta.y)), overlap.y)
    };

    Some(Contact {
        point: b_center + normal * b_half,
        normal,
        penetration,
    })
}

/// Circle against circle
pub fn circle_circle(
    a_center: Vec2,
    a_radius: f32,
    b_center: Vec2,
    b_radius: f32,
) -> Option<Contact> {
    let delta = a_center - b_center;
    let dist = delta.length();
    let reach = a_radius + b_radius;
    if dist >= reach + CONTACT_SLOP {
        return None;
    }

    // Coincident centers - pick an arbitrary but stable axis
    let normal = if dist > f32::EPSILON { delta / dist } else { Vec2::Y };
    Some(Contact {
        point: b_center + normal * b_radius,
        normal,
        penetration: reach - dist,
    })
}

/// Contact test for any shape pair; normal points from `b` toward `a`
pub fn contact(a: &Shape, a_pos: Vec2, b: &Shape, b_pos: Vec2) -> Option<Contact> {
    match (*a, *b) {
        (Shape::Circle { radius }, Shape::Rect { size }) => {
            circle_rect(a_pos, radius, b_pos, size / 2.0)
        }
        (Shape::Rect { size }, Shape::Circle { radius }) => {
            circle_rect(b_pos, radius, a_pos, size / 2.0).map(|c| Contact {
                point: b_pos - c.normal * radius,
                normal: -c.normal,
                penetration: c.penetration,
            })
        }
        (Shape::Rect { size: sa }, Shape::Rect { size: sb }) => {
            rect_rect(a_pos, sa / 2.0, b_pos, sb / 2.0)
        }
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a_pos, ra, b_pos, rb)
        }
    }
}

/// Remove the approaching normal component of `velocity`
///
/// `restitution = 1` is a mirror reflection: v' = v - 2(v·n)n.
/// `restitution = 0` keeps only the tangential slide.
#[inline]
pub fn resolve_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let approach = velocity.dot(normal);
    if approach >= 0.0 {
        return velocity;
    }
    velocity - (1.0 + restitution) * approach * normal
}

#[inline]
fn sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_rect_face_contact() {
        // Rect spanning x in [-10, 10], ball approaching from the right
        let hit =
            circle_rect(Vec2::new(14.0, 0.0), 5.0, Vec2::ZERO, Vec2::new(10.0, 10.0)).unwrap();
        assert!((hit.normal - Vec2::X).length() < 1e-5);
        assert!((hit.penetration - 1.0).abs() < 1e-5);
        assert!((hit.point - Vec2::new(10.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_circle_rect_miss() {
        assert!(circle_rect(Vec2::new(20.0, 0.0), 5.0, Vec2::ZERO, Vec2::splat(10.0)).is_none());
        // Diagonal from the corner: distance ~7.07 > radius
        assert!(circle_rect(Vec2::new(15.0, 15.0), 5.0, Vec2::ZERO, Vec2::splat(10.0)).is_none());
    }

    #[test]
    fn test_circle_center_inside_rect() {
        let hit = circle_rect(Vec2::new(0.0, 8.0), 2.0, Vec2::ZERO, Vec2::new(10.0, 10.0)).unwrap();
        assert_eq!(hit.normal, Vec2::Y);
        assert!((hit.penetration - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_rect_rect_least_overlap_axis() {
        let hit = rect_rect(
            Vec2::new(0.0, 9.0),
            Vec2::new(5.0, 5.0),
            Vec2::ZERO,
            Vec2::new(20.0, 5.0),
        )
        .unwrap();
        assert_eq!(hit.normal, Vec2::Y);
        assert!((hit.penetration - 1.0).abs() < 1e-5);

        assert!(
            rect_rect(Vec2::new(0.0, 20.0), Vec2::splat(5.0), Vec2::ZERO, Vec2::splat(5.0))
                .is_none()
        );
    }

    #[test]
    fn test_contact_flips_normal_for_rect_first() {
        let circle = Shape::Circle { radius: 5.0 };
        let rect = Shape::Rect { size: Vec2::new(20.0, 20.0) };
        let ab = contact(&circle, Vec2::new(14.0, 0.0), &rect, Vec2::ZERO).unwrap();
        let ba = contact(&rect, Vec2::ZERO, &circle, Vec2::new(14.0, 0.0)).unwrap();
        assert!((ab.normal + ba.normal).length() < 1e-5);
        assert!((ab.penetration - ba.penetration).abs() < 1e-5);
    }

    #[test]
    fn test_circle_circle() {
        let hit = circle_circle(Vec2::new(3.0, 0.0), 2.0, Vec2::ZERO, 2.0).unwrap();
        assert_eq!(hit.normal, Vec2::X);
        assert!((hit.penetration - 1.0).abs() < 1e-5);
        assert!(circle_circle(Vec2::new(10.0, 0.0), 2.0, Vec2::ZERO, 2.0).is_none());
    }

    #[test]
    fn test_resolve_velocity() {
        // Moving right into a wall whose normal points left
        let v = Vec2::new(100.0, 20.0);
        let n = Vec2::new(-1.0, 0.0);

        let bounced = resolve_velocity(v, n, 1.0);
        assert!((bounced - Vec2::new(-100.0, 20.0)).length() < 1e-3);

        let slid = resolve_velocity(v, n, 0.0);
        assert!((slid - Vec2::new(0.0, 20.0)).length() < 1e-3);

        // Already separating - untouched
        assert_eq!(resolve_velocity(-v, n, 0.0), -v);
    }
}
