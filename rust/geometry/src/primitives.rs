// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Primitive mesh builders
//!
//! Boxes and capped cylinders are the only primitives a studded brick
//! needs. Both are generated origin-centered; callers translate and merge.

use crate::mesh::Mesh;
use nalgebra::{Point3, Vector3};

/// Build an origin-centered box with flat per-face normals
pub fn box_mesh(width: f32, height: f32, depth: f32) -> Mesh {
    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
    let mut mesh = Mesh::with_capacity(24, 36);

    // Each face: normal and four corners, counter-clockwise from outside
    let faces: [(Vector3<f32>, [Point3<f32>; 4]); 6] = [
        (
            Vector3::x(),
            [
                Point3::new(hw, -hh, -hd),
                Point3::new(hw, hh, -hd),
                Point3::new(hw, hh, hd),
                Point3::new(hw, -hh, hd),
            ],
        ),
        (
            -Vector3::x(),
            [
                Point3::new(-hw, -hh, hd),
                Point3::new(-hw, hh, hd),
                Point3::new(-hw, hh, -hd),
                Point3::new(-hw, -hh, -hd),
            ],
        ),
        (
            Vector3::y(),
            [
                Point3::new(-hw, hh, -hd),
                Point3::new(-hw, hh, hd),
                Point3::new(hw, hh, hd),
                Point3::new(hw, hh, -hd),
            ],
        ),
        (
            -Vector3::y(),
            [
                Point3::new(-hw, -hh, hd),
                Point3::new(-hw, -hh, -hd),
                Point3::new(hw, -hh, -hd),
                Point3::new(hw, -hh, hd),
            ],
        ),
        (
            Vector3::z(),
            [
                Point3::new(-hw, -hh, hd),
                Point3::new(hw, -hh, hd),
                Point3::new(hw, hh, hd),
                Point3::new(-hw, hh, hd),
            ],
        ),
        (
            -Vector3::z(),
            [
                Point3::new(hw, -hh, -hd),
                Point3::new(-hw, -hh, -hd),
                Point3::new(-hw, hh, -hd),
                Point3::new(hw, hh, -hd),
            ],
        ),
    ];

    for (normal, corners) in faces {
        let base = mesh.vertex_count() as u32;
        for corner in corners {
            mesh.add_vertex(corner, normal);
        }
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }

    mesh
}

/// Build an origin-centered Y-axis cylinder with capped ends
///
/// Sides get smooth radial normals; caps get flat axial normals with their
/// own vertex ring.
pub fn cylinder_mesh(radius: f32, height: f32, segments: u32) -> Mesh {
    let hh = height / 2.0;
    let segments = segments.max(3);
    let vertex_estimate = (segments as usize + 1) * 2 + (segments as usize + 1) * 2 + 2;
    let mut mesh = Mesh::with_capacity(vertex_estimate, segments as usize * 12);

    let ring_angle = |i: u32| {
        let t = i as f32 / segments as f32;
        t * std::f32::consts::TAU
    };

    // Side wall; the seam ring is duplicated so the last quad closes the loop
    let side_base = mesh.vertex_count() as u32;
    for i in 0..=segments {
        let theta = ring_angle(i);
        let (sin, cos) = theta.sin_cos();
        let normal = Vector3::new(cos, 0.0, sin);
        mesh.add_vertex(Point3::new(radius * cos, hh, radius * sin), normal);
        mesh.add_vertex(Point3::new(radius * cos, -hh, radius * sin), normal);
    }
    for i in 0..segments {
        let top0 = side_base + i * 2;
        let bot0 = top0 + 1;
        let top1 = top0 + 2;
        let bot1 = top0 + 3;
        mesh.add_triangle(top0, bot0, top1);
        mesh.add_triangle(top1, bot0, bot1);
    }

    // Caps: center fan with flat normals
    for (y, normal) in [(hh, Vector3::y()), (-hh, -Vector3::y())] {
        let center = mesh.vertex_count() as u32;
        mesh.add_vertex(Point3::new(0.0, y, 0.0), normal);
        for i in 0..=segments {
            let theta = ring_angle(i);
            let (sin, cos) = theta.sin_cos();
            mesh.add_vertex(Point3::new(radius * cos, y, radius * sin), normal);
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = center + 2 + i;
            if y > 0.0 {
                mesh.add_triangle(center, b, a);
            } else {
                mesh.add_triangle(center, a, b);
            }
        }
    }

    mesh
}
