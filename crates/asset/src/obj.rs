//! OBJ parser supporting positions, normals, texture coordinates and
//! `usemtl` face groups.
//!
//! The geometry pass consumes a material set that must already be parsed
//! (see `loader`): each `usemtl` starts a new mesh node resolved against
//! that set.

use std::{
    collections::HashMap,
    io::{self, BufRead},
};

use anyhow::{Context, Result, anyhow};

use corelib::material::MaterialDescriptor;

use crate::model::{MeshNode, MeshVertex};
use crate::mtl::MaterialSet;

/// Parse an OBJ document from a [`BufRead`] implementation.
pub fn parse_obj<R: BufRead>(reader: R, materials: &MaterialSet) -> Result<Vec<MeshNode>> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut texcoords: Vec<[f32; 2]> = Vec::new();

    let mut nodes: Vec<MeshNode> = Vec::new();
    let mut current = GroupBuilder::new("default", MaterialDescriptor::default());

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let tag = parts
            .next()
            .ok_or_else(|| anyhow!("Malformed OBJ line {}: '{}'", line_no + 1, trimmed))?;

        match tag {
            "v" => {
                let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                positions.push([x, y, z]);
            }
            "vt" => {
                let u = parse_f32(parts.next(), line_no, "u coordinate")?;
                let v = parse_f32(parts.next(), line_no, "v coordinate")?;
                texcoords.push([u, v]);
            }
            "vn" => {
                let nx = parse_f32(parts.next(), line_no, "nx coordinate")?;
                let ny = parse_f32(parts.next(), line_no, "ny coordinate")?;
                let nz = parse_f32(parts.next(), line_no, "nz coordinate")?;
                normals.push([nx, ny, nz]);
            }
            "usemtl" => {
                let name = parts
                    .next()
                    .ok_or_else(|| anyhow!("usemtl without a name on line {}", line_no + 1))?;
                let material = match materials.get(name) {
                    Some(source) => source.to_descriptor(),
                    None => {
                        log::warn!("usemtl '{}' not in the material set; using default", name);
                        MaterialDescriptor::default()
                    }
                };
                if let Some(node) = current.finish() {
                    nodes.push(node);
                }
                current = GroupBuilder::new(name, material);
            }
            "f" => {
                let mut face_indices: Vec<u32> = Vec::new();
                for part in parts {
                    let (vi, vti, vni) = parse_face_vertex(
                        part,
                        positions.len(),
                        texcoords.len(),
                        normals.len(),
                        line_no,
                    )?;
                    let index = current.index_for(
                        VertexKey(vi, vti, vni),
                        &positions,
                        &texcoords,
                        &normals,
                        line_no,
                    )?;
                    face_indices.push(index);
                }

                if face_indices.len() < 3 {
                    continue;
                }
                // Triangulate fan
                for tri in 1..(face_indices.len() - 1) {
                    current.indices.push(face_indices[0]);
                    current.indices.push(face_indices[tri]);
                    current.indices.push(face_indices[tri + 1]);
                }
            }
            _ => {
                // Ignore other directives (o/g/s/mtllib/etc.)
            }
        }
    }

    if let Some(node) = current.finish() {
        nodes.push(node);
    }

    if nodes.is_empty() {
        anyhow::bail!("OBJ contained no triangles");
    }
    Ok(nodes)
}

/// Convenience helper to parse an OBJ string.
pub fn parse_obj_str(contents: &str, materials: &MaterialSet) -> Result<Vec<MeshNode>> {
    parse_obj(io::Cursor::new(contents), materials)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct VertexKey(usize, Option<usize>, Option<usize>);

/// Accumulates one `usemtl` face group; vertices are deduplicated per
/// group so each node carries a self-contained index buffer.
struct GroupBuilder {
    name: String,
    material: MaterialDescriptor,
    unique: HashMap<VertexKey, u32>,
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
}

impl GroupBuilder {
    fn new(name: &str, material: MaterialDescriptor) -> Self {
        Self {
            name: name.to_string(),
            material,
            unique: HashMap::new(),
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    fn index_for(
        &mut self,
        key: VertexKey,
        positions: &[[f32; 3]],
        texcoords: &[[f32; 2]],
        normals: &[[f32; 3]],
        line_no: usize,
    ) -> Result<u32> {
        if let Some(&index) = self.unique.get(&key) {
            return Ok(index);
        }
        let VertexKey(vi, vti, vni) = key;
        let position = positions
            .get(vi)
            .copied()
            .ok_or_else(|| anyhow!("Position index out of bounds on line {}", line_no + 1))?;
        let uv = vti
            .and_then(|i| texcoords.get(i).copied())
            .unwrap_or([0.0, 0.0]);
        let normal = vni
            .and_then(|i| normals.get(i).copied())
            .unwrap_or([0.0, 0.0, 1.0]);

        let index = u32::try_from(self.vertices.len())
            .map_err(|_| anyhow!("Too many vertices in OBJ group (>{})", u32::MAX))?;
        self.vertices.push(MeshVertex::new(position, normal, uv));
        self.unique.insert(key, index);
        Ok(index)
    }

    fn finish(self) -> Option<MeshNode> {
        if self.indices.is_empty() {
            return None;
        }
        Some(MeshNode::new(
            self.name,
            self.vertices,
            self.indices,
            self.material,
        ))
    }
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &str) -> Result<f32> {
    let token = value.ok_or_else(|| anyhow!("Missing {} on line {}", what, line_no + 1))?;
    token
        .parse::<f32>()
        .with_context(|| format!("Failed to parse {} on line {}", what, line_no + 1))
}

fn parse_face_vertex(
    token: &str,
    pos_count: usize,
    tex_count: usize,
    norm_count: usize,
    line_no: usize,
) -> Result<(usize, Option<usize>, Option<usize>)> {
    let mut split = token.split('/');
    let pos = split
        .next()
        .ok_or_else(|| anyhow!("Malformed face element '{}' on line {}", token, line_no + 1))?;
    let pos_idx = resolve_index(pos, pos_count, line_no)?;

    let tex_idx = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, tex_count, line_no)?),
        _ => None,
    };

    let norm_idx = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, norm_count, line_no)?),
        _ => None,
    };

    Ok((pos_idx, tex_idx, norm_idx))
}

fn resolve_index(token: &str, len: usize, line_no: usize) -> Result<usize> {
    let raw = token
        .parse::<i32>()
        .with_context(|| format!("Invalid index '{}' on line {}", token, line_no + 1))?;
    if raw == 0 {
        anyhow::bail!("OBJ indices are 1-based; found 0 on line {}", line_no + 1);
    }

    let idx = if raw > 0 {
        (raw - 1) as isize
    } else {
        (len as isize) + (raw as isize)
    };

    if idx < 0 || idx as usize >= len {
        anyhow::bail!(
            "OBJ index {} resolved out of bounds (len={}) on line {}",
            raw,
            len,
            line_no + 1
        );
    }

    Ok(idx as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mtl::parse_mtl;

    #[test]
    fn parse_simple_triangle() {
        let src = r#"
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            vn 0.0 0.0 1.0
            vt 0.0 0.0
            vt 1.0 0.0
            vt 0.0 1.0
            f 1/1/1 2/2/1 3/3/1
        "#;
        let nodes = parse_obj_str(src, &MaterialSet::default()).expect("parse triangle");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].vertices.len(), 3);
        assert_eq!(nodes[0].indices.len(), 3);
        assert!(nodes[0].is_valid());
    }

    #[test]
    fn usemtl_splits_into_named_groups() {
        let mtl = "newmtl red\nKd 1.0 0.0 0.0\nnewmtl blue\nKd 0.0 0.0 1.0\n";
        let materials = parse_mtl(mtl).expect("parse mtl");
        let src = r#"
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            v 1.0 1.0 0.0
            usemtl red
            f 1 2 3
            usemtl blue
            f 2 4 3
        "#;
        let nodes = parse_obj_str(src, &materials).expect("parse groups");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "red");
        assert_eq!(nodes[0].material.color, [1.0, 0.0, 0.0]);
        assert_eq!(nodes[1].name, "blue");
        assert_eq!(nodes[1].material.color, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn unknown_usemtl_falls_back_to_default() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl ghost\nf 1 2 3\n";
        let nodes = parse_obj_str(src, &MaterialSet::default()).expect("parse");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].material, MaterialDescriptor::default());
    }

    #[test]
    fn quads_triangulate_as_a_fan() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let nodes = parse_obj_str(src, &MaterialSet::default()).expect("parse quad");
        assert_eq!(nodes[0].indices.len(), 6);
        assert_eq!(nodes[0].triangle_count(), 2);
    }

    #[test]
    fn geometry_without_faces_is_rejected() {
        let err = parse_obj_str("v 0 0 0\n", &MaterialSet::default()).unwrap_err();
        assert!(err.to_string().contains("no triangles"));
    }

    #[test]
    fn out_of_bounds_index_is_rejected() {
        let err = parse_obj_str("v 0 0 0\nf 1 2 3\n", &MaterialSet::default()).unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }
}
