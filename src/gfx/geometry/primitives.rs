//! # Primitive Shape Generation
//!
//! Functions to generate the primitive shapes the house is assembled from.
//! All shapes are generated with proper outward-facing normals and
//! counter-clockwise winding.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate an axis-aligned box centered at the origin
///
/// Each face has four vertices with the face normal, so the box renders
/// flat-shaded.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);

    let positions = [
        // Front face (+Z)
        [-x, -y, z],
        [x, -y, z],
        [x, y, z],
        [-x, y, z],
        // Back face (-Z)
        [-x, -y, -z],
        [-x, y, -z],
        [x, y, -z],
        [x, -y, -z],
        // Left face (-X)
        [-x, -y, -z],
        [-x, -y, z],
        [-x, y, z],
        [-x, y, -z],
        // Right face (+X)
        [x, -y, z],
        [x, -y, -z],
        [x, y, -z],
        [x, y, z],
        // Top face (+Y)
        [-x, y, z],
        [x, y, z],
        [x, y, -z],
        [-x, y, -z],
        // Bottom face (-Y)
        [-x, -y, -z],
        [x, -y, -z],
        [x, -y, z],
        [-x, -y, z],
    ];

    let normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [0.0, 0.0, -1.0],
        [0.0, 0.0, -1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.positions = positions.to_vec();
    data.normals = normals.to_vec();

    // Two triangles per face
    data.indices = vec![
        0, 1, 2, 2, 3, 0, // front
        4, 5, 6, 6, 7, 4, // back
        8, 9, 10, 10, 11, 8, // left
        12, 13, 14, 14, 15, 12, // right
        16, 17, 18, 18, 19, 16, // top
        20, 21, 22, 22, 23, 20, // bottom
    ];

    data
}

/// Generate a UV sphere with the given radius and resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            // Spherical to Cartesian coordinates, Y up
            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.positions.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a flat-shaded cone with apex up
///
/// The apex sits at `+height/2`, the base circle at `-height/2`. Four
/// segments give the stylized pyramid roof its shape; rotate it 45 degrees
/// around Y to align the faces with a square footprint.
pub fn generate_cone(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half = height / 2.0;
    let slant = (height * height + radius * radius).sqrt();

    // Side faces, one flat-shaded triangle each
    for i in 0..segs {
        let phi0 = i as f32 * 2.0 * PI / segs as f32;
        let phi1 = (i + 1) as f32 * 2.0 * PI / segs as f32;
        let phi_mid = (phi0 + phi1) / 2.0;

        let base0 = [radius * phi0.cos(), -half, radius * phi0.sin()];
        let base1 = [radius * phi1.cos(), -half, radius * phi1.sin()];
        let apex = [0.0, half, 0.0];

        // Face normal of the slanted triangle
        let normal = [
            height * phi_mid.cos() / slant,
            radius / slant,
            height * phi_mid.sin() / slant,
        ];

        let start = data.positions.len() as u32;
        data.positions.extend_from_slice(&[apex, base1, base0]);
        data.normals.extend_from_slice(&[normal, normal, normal]);
        data.indices.extend_from_slice(&[start, start + 1, start + 2]);
    }

    // Base cap as a fan, facing down
    let center = data.positions.len() as u32;
    data.positions.push([0.0, -half, 0.0]);
    data.normals.push([0.0, -1.0, 0.0]);
    for i in 0..=segs {
        let phi = i as f32 * 2.0 * PI / segs as f32;
        data.positions
            .push([radius * phi.cos(), -half, radius * phi.sin()]);
        data.normals.push([0.0, -1.0, 0.0]);
    }
    for i in 0..segs {
        data.indices
            .extend_from_slice(&[center, center + 1 + i, center + 2 + i]);
    }

    data
}

/// Generate a gabled roof prism
///
/// A triangular cross-section (base `width`, peak `height` above the base)
/// extruded along Z over `depth`, centered at the origin with the base at
/// `y = 0`. Two of these intersecting at right angles form the realistic
/// roof.
pub fn generate_gable_prism(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (x, z) = (width / 2.0, depth / 2.0);
    let slant = (height * height + x * x).sqrt();
    // Outward normals of the two slanted faces
    let left_normal = [-height / slant, x / slant, 0.0];
    let right_normal = [height / slant, x / slant, 0.0];

    let mut quad = |a: [f32; 3], b: [f32; 3], c: [f32; 3], d: [f32; 3], normal: [f32; 3]| {
        let start = data.positions.len() as u32;
        data.positions.extend_from_slice(&[a, b, c, d]);
        data.normals.extend_from_slice(&[normal; 4]);
        data.indices
            .extend_from_slice(&[start, start + 1, start + 2, start + 2, start + 3, start]);
    };

    // Left slope
    quad(
        [-x, 0.0, z],
        [0.0, height, z],
        [0.0, height, -z],
        [-x, 0.0, -z],
        left_normal,
    );
    // Right slope
    quad(
        [0.0, height, z],
        [x, 0.0, z],
        [x, 0.0, -z],
        [0.0, height, -z],
        right_normal,
    );
    // Bottom
    quad(
        [-x, 0.0, -z],
        [x, 0.0, -z],
        [x, 0.0, z],
        [-x, 0.0, z],
        [0.0, -1.0, 0.0],
    );

    // Triangular end caps
    let mut cap = |z_pos: f32, normal: [f32; 3], flip: bool| {
        let start = data.positions.len() as u32;
        data.positions.extend_from_slice(&[
            [-x, 0.0, z_pos],
            [x, 0.0, z_pos],
            [0.0, height, z_pos],
        ]);
        data.normals.extend_from_slice(&[normal; 3]);
        if flip {
            data.indices.extend_from_slice(&[start, start + 2, start + 1]);
        } else {
            data.indices.extend_from_slice(&[start, start + 1, start + 2]);
        }
    };
    cap(z, [0.0, 0.0, 1.0], false);
    cap(-z, [0.0, 0.0, -1.0], true);

    data
}

/// Generate a ground plane in the XZ plane with the normal pointing up
pub fn generate_plane(width: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (x, z) = (width / 2.0, depth / 2.0);
    data.positions = vec![[-x, 0.0, -z], [-x, 0.0, z], [x, 0.0, z], [x, 0.0, -z]];
    data.normals = vec![[0.0, 1.0, 0.0]; 4];
    data.indices = vec![0, 1, 2, 2, 3, 0];

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_generation() {
        let cube = generate_box(1.0, 1.0, 1.0);
        assert_eq!(cube.positions.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_box_respects_dimensions() {
        let base = generate_box(4.0, 3.0, 4.0);
        let max_y = base
            .positions
            .iter()
            .map(|p| p[1])
            .fold(f32::MIN, f32::max);
        let min_y = base
            .positions
            .iter()
            .map(|p| p[1])
            .fold(f32::MAX, f32::min);
        assert!((max_y - 1.5).abs() < f32::EPSILON);
        assert!((min_y + 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(0.2, 16, 16);
        assert!(sphere.positions.len() > 0);
        assert!(sphere.indices.len() > 0);
        assert_eq!(sphere.positions.len(), sphere.normals.len());

        // Every point sits on the sphere surface
        for p in &sphere.positions {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cone_generation() {
        let pyramid = generate_cone(3.5, 2.5, 4);
        // 4 side triangles + base fan (center + 5 rim + 4 triangles)
        assert_eq!(pyramid.triangle_count(), 8);

        // Side normals point outward and slightly up
        for n in pyramid.normals.iter().take(12) {
            assert!(n[1] > 0.0);
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_gable_prism_generation() {
        let prism = generate_gable_prism(4.4, 1.8, 4.4);
        // 3 quads (2 triangles each) + 2 caps
        assert_eq!(prism.triangle_count(), 8);
        assert_eq!(prism.positions.len(), prism.normals.len());

        let max_y = prism.positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
        assert!((max_y - 1.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_plane_generation() {
        let ground = generate_plane(30.0, 30.0);
        assert_eq!(ground.vertex_count(), 4);
        assert_eq!(ground.triangle_count(), 2);
        assert!(ground.normals.iter().all(|n| *n == [0.0, 1.0, 0.0]));
    }
}
