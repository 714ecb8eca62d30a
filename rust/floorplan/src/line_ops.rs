// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line extraction and post-processing for wall detection

use crate::types::DetectedSegment;
use floorplan3d_geometry::distance_to_segment;
use image::GrayImage;
use nalgebra::Point2;
use std::f64::consts::PI;

/// Upper bound on accumulator peaks turned into segments
const MAX_PEAKS: usize = 500;

/// Distance in rho under which an edge pixel belongs to a peak's line
const RHO_BAND: f64 = 2.0;

/// Probabilistic Hough transform over a binary edge image
///
/// Every accumulator cell with at least `threshold` votes is walked in vote
/// order; edge pixels within the cell's band are sorted along the line and
/// split wherever two neighbours are more than `max_line_gap` apart. Runs
/// shorter than `min_line_length` are dropped. A pixel is consumed by the
/// first segment that claims it.
pub fn detect_lines(
    edges: &GrayImage,
    threshold: u32,
    min_line_length: f64,
    max_line_gap: f64,
) -> Vec<DetectedSegment> {
    let width = edges.width() as i64;
    let height = edges.height() as i64;

    let num_thetas = 180usize;
    let theta_step = PI / num_thetas as f64;
    let (cos_table, sin_table): (Vec<f64>, Vec<f64>) = (0..num_thetas)
        .map(|i| {
            let theta = i as f64 * theta_step;
            (theta.cos(), theta.sin())
        })
        .unzip();

    let max_rho = ((width * width + height * height) as f64).sqrt();
    let num_rhos = (2.0 * max_rho) as usize + 1;

    let edge_points: Vec<(i64, i64)> = edges
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[0] > 128)
        .map(|(x, y, _)| (x as i64, y as i64))
        .collect();

    if edge_points.is_empty() {
        return Vec::new();
    }

    let mut accumulator = vec![0u32; num_thetas * num_rhos];
    for &(x, y) in &edge_points {
        for t in 0..num_thetas {
            let rho = x as f64 * cos_table[t] + y as f64 * sin_table[t];
            let r = (rho + max_rho) as usize;
            if r < num_rhos {
                accumulator[t * num_rhos + r] += 1;
            }
        }
    }

    let mut peaks: Vec<(usize, usize, u32)> = accumulator
        .iter()
        .enumerate()
        .filter(|(_, &votes)| votes >= threshold)
        .map(|(i, &votes)| (i / num_rhos, i % num_rhos, votes))
        .collect();
    peaks.sort_by(|a, b| b.2.cmp(&a.2));

    let mut used = vec![false; edge_points.len()];
    let mut lines = Vec::new();

    for &(t, r, _) in peaks.iter().take(MAX_PEAKS) {
        let rho = r as f64 - max_rho;
        let (cos_t, sin_t) = (cos_table[t], sin_table[t]);

        let mut members: Vec<(f64, usize)> = edge_points
            .iter()
            .enumerate()
            .filter(|(i, _)| !used[*i])
            .filter(|(_, &(x, y))| (x as f64 * cos_t + y as f64 * sin_t - rho).abs() < RHO_BAND)
            .map(|(i, &(x, y))| (-(x as f64) * sin_t + y as f64 * cos_t, i))
            .collect();

        if members.len() < 2 {
            continue;
        }
        members.sort_by(|a, b| a.0.total_cmp(&b.0));

        let point = |i: usize| {
            let (x, y) = edge_points[i];
            Point2::new(x as f64, y as f64)
        };

        let mut run_start = 0;
        for k in 1..=members.len() {
            let split = k == members.len()
                || (point(members[k].1) - point(members[k - 1].1)).norm() > max_line_gap;
            if !split {
                continue;
            }
            if k - run_start >= 2 {
                let segment =
                    DetectedSegment::new(point(members[run_start].1), point(members[k - 1].1));
                if segment.length() >= min_line_length {
                    for &(_, i) in &members[run_start..k] {
                        used[i] = true;
                    }
                    lines.push(segment);
                }
            }
            run_start = k;
        }
    }

    lines
}

/// Keep segments strictly longer than `min_length`
pub fn filter_short_lines(lines: &[DetectedSegment], min_length: f64) -> Vec<DetectedSegment> {
    lines
        .iter()
        .filter(|l| l.length() > min_length)
        .copied()
        .collect()
}

/// Merge groups of collinear, nearby segments into their longest span
pub fn merge_collinear_lines(
    lines: &[DetectedSegment],
    angle_tolerance: f64,
    distance_tolerance: f64,
) -> Vec<DetectedSegment> {
    let mut merged = Vec::new();
    let mut used = vec![false; lines.len()];

    for (i, line) in lines.iter().enumerate() {
        if used[i] {
            continue;
        }
        used[i] = true;

        let mut group = vec![*line];
        for (j, other) in lines.iter().enumerate().skip(i + 1) {
            if !used[j] && are_collinear(line, other, angle_tolerance, distance_tolerance) {
                group.push(*other);
                used[j] = true;
            }
        }
        merged.push(merge_line_group(&group));
    }

    merged
}

fn are_collinear(
    a: &DetectedSegment,
    b: &DetectedSegment,
    angle_tolerance: f64,
    distance_tolerance: f64,
) -> bool {
    let mut angle_diff = (a.angle() - b.angle()).abs() % PI;
    if angle_diff > PI / 2.0 {
        angle_diff = PI - angle_diff;
    }
    if angle_diff > angle_tolerance {
        return false;
    }
    // Distance to the carrier line, not the clamped segment
    let segment = a.to_segment();
    let offset = b.midpoint() - a.start;
    let distance = match segment.normal() {
        Some(n) => offset.dot(&n).abs(),
        None => distance_to_segment(&b.midpoint(), &segment),
    };
    distance <= distance_tolerance
}

/// Extreme endpoints of the group along its first member's direction
fn merge_line_group(group: &[DetectedSegment]) -> DetectedSegment {
    let first = group[0];
    if group.len() == 1 {
        return first;
    }

    let angle = first.angle();
    let (cos_a, sin_a) = (angle.cos(), angle.sin());
    let project = |p: &Point2<f64>| p.x * cos_a + p.y * sin_a;

    let mut min_point = first.start;
    let mut max_point = first.start;
    for p in group.iter().flat_map(|l| [l.start, l.end]) {
        if project(&p) < project(&min_point) {
            min_point = p;
        }
        if project(&p) > project(&max_point) {
            max_point = p;
        }
    }

    DetectedSegment::new(min_point, max_point)
}
