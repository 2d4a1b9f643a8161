//! Greedy beeswarm packing.
//!
//! Circles are placed largest first. Each one starts flush against the lane
//! centerline and, if that spot is taken, moves out to the smallest tangent
//! offset against an already placed circle that collides with nothing.
//! The result depends on input order by design of the greedy pass and must
//! not be replaced with a global optimization.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Caller's identifier, carried through untouched.
    pub index: usize,
    /// Position along the primary axis.
    pub y: f64,
    pub r: f64,
    /// Sort key; larger circles are placed first.
    pub size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placed {
    pub index: usize,
    pub y: f64,
    pub r: f64,
    pub size: f64,
    /// Lateral distance of the center from the lane centerline.
    pub offset: f64,
}

/// Packs `circles` and returns them in placement order (descending size).
pub fn dodge(circles: &[Circle], padding: f64, epsilon: f64) -> Vec<Placed> {
    let mut order: Vec<Circle> = circles.to_vec();
    order.sort_by(|a, b| b.size.partial_cmp(&a.size).unwrap_or(Ordering::Equal));

    // Insertion-ordered queue of placed circles.
    let mut queue: Vec<Placed> = Vec::with_capacity(order.len());

    for b in order {
        let mut offset = b.r;
        if intersects(&queue, offset, b.y, b.r, padding, epsilon) {
            offset = f64::INFINITY;
            for a in &queue {
                let reach = a.r + b.r + padding;
                let candidate = a.offset + (reach * reach - (a.y - b.y).powi(2)).sqrt();
                // NaN (a is out of reach) fails the comparison and is skipped.
                if candidate < offset && !intersects(&queue, candidate, b.y, b.r, padding, epsilon)
                {
                    offset = candidate;
                }
            }
        }

        queue.push(Placed {
            index: b.index,
            y: b.y,
            r: b.r,
            size: b.size,
            offset,
        });
    }

    queue
}

fn intersects(queue: &[Placed], offset: f64, y: f64, r: f64, padding: f64, epsilon: f64) -> bool {
    queue.iter().any(|a| {
        let reach = a.r + r + padding;
        reach * reach - epsilon > (a.offset - offset).powi(2) + (a.y - y).powi(2)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PADDING: f64 = 1.5;
    const EPSILON: f64 = 1e-3;

    fn circle(index: usize, y: f64, r: f64, size: f64) -> Circle {
        Circle { index, y, r, size }
    }

    fn assert_no_overlap(placed: &[Placed]) {
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                let reach = a.r + b.r + PADDING;
                let dist = ((a.offset - b.offset).powi(2) + (a.y - b.y).powi(2)).sqrt();
                assert!(
                    dist >= reach - EPSILON,
                    "{} and {} overlap: dist {dist}, reach {reach}",
                    a.index,
                    b.index
                );
            }
        }
    }

    #[test]
    fn lone_circle_sits_on_the_centerline() {
        let placed = dodge(&[circle(0, 100.0, 4.0, 10.0)], PADDING, EPSILON);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].offset, 4.0);
    }

    #[test]
    fn places_largest_first() {
        let placed = dodge(
            &[
                circle(0, 100.0, 2.0, 5.0),
                circle(1, 100.0, 6.0, 40.0),
                circle(2, 100.0, 3.0, 15.0),
            ],
            PADDING,
            EPSILON,
        );
        let order: Vec<usize> = placed.iter().map(|p| p.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn same_row_circles_stack_outward() {
        let placed = dodge(
            &[
                circle(0, 100.0, 6.0, 40.0),
                circle(1, 100.0, 3.0, 15.0),
                circle(2, 100.0, 2.0, 5.0),
            ],
            PADDING,
            EPSILON,
        );
        assert_eq!(placed[0].offset, 6.0);
        assert!((placed[1].offset - (6.0 + 6.0 + 3.0 + PADDING)).abs() < 1e-9);
        assert!((placed[2].offset - (placed[1].offset + 3.0 + 2.0 + PADDING)).abs() < 1e-9);
        assert_no_overlap(&placed);
    }

    #[test]
    fn distant_circles_do_not_interact() {
        let placed = dodge(
            &[circle(0, 0.0, 3.0, 10.0), circle(1, 500.0, 3.0, 5.0)],
            PADDING,
            EPSILON,
        );
        assert_eq!(placed[0].offset, 3.0);
        assert_eq!(placed[1].offset, 3.0);
    }

    #[test]
    fn nearby_circles_pick_the_tangent() {
        let placed = dodge(
            &[circle(0, 0.0, 3.0, 10.0), circle(1, 4.0, 3.0, 5.0)],
            PADDING,
            EPSILON,
        );
        let reach: f64 = 3.0 + 3.0 + PADDING;
        let expected = 3.0 + (reach * reach - 16.0).sqrt();
        assert!((placed[1].offset - expected).abs() < 1e-9);
        assert_no_overlap(&placed);
    }

    #[test]
    fn dense_column_never_overlaps() {
        let circles: Vec<Circle> = (0..60)
            .map(|i| circle(i, (i % 7) as f64 * 2.5, 3.25, (i * 37 % 11) as f64))
            .collect();
        let placed = dodge(&circles, PADDING, EPSILON);
        assert_eq!(placed.len(), circles.len());
        assert!(placed.iter().all(|p| p.offset.is_finite()));
        assert_no_overlap(&placed);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let circles: Vec<Circle> = (0..30)
            .map(|i| circle(i, (i * 13 % 17) as f64, 1.0 + (i % 4) as f64, (i % 5) as f64))
            .collect();
        assert_eq!(
            dodge(&circles, PADDING, EPSILON),
            dodge(&circles, PADDING, EPSILON)
        );
    }

    #[test]
    fn degenerate_sizes_still_pack() {
        let placed = dodge(
            &[circle(0, 10.0, 0.0, 0.0), circle(1, 10.0, 0.0, 0.0)],
            PADDING,
            EPSILON,
        );
        assert_eq!(placed[0].offset, 0.0);
        assert_eq!(placed[1].offset, PADDING);
    }

    #[test]
    fn equal_sizes_keep_input_order() {
        let placed = dodge(
            &[circle(4, 0.0, 3.0, 10.0), circle(2, 0.0, 3.0, 10.0)],
            PADDING,
            EPSILON,
        );
        assert_eq!(placed[0].index, 4);
        assert_eq!(placed[1].index, 2);
    }
}
