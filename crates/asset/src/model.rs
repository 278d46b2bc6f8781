//! In-memory model representation and the brand-material override.

use corelib::material::{BRAND, MaterialDescriptor};

/// Vertex with position/normal/uv. Values are in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// One indexed triangle group carrying a single material.
#[derive(Clone, Debug)]
pub struct MeshNode {
    pub name: String,
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub material: MaterialDescriptor,
}

impl MeshNode {
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<MeshVertex>,
        indices: Vec<u32>,
        material: MaterialDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices,
            material,
        }
    }

    /// Non-empty buffers and a whole number of triangles.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty() && self.indices.len() % 3 == 0
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Scene graph produced by a single load. Owned exclusively by one viewer
/// for its lifetime; a remount always produces a fresh instance.
#[derive(Clone, Debug)]
pub struct LoadedModel {
    pub name: String,
    pub nodes: Vec<MeshNode>,
}

impl LoadedModel {
    pub fn new(name: impl Into<String>, nodes: Vec<MeshNode>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.nodes.iter().map(MeshNode::triangle_count).sum()
    }

    /// True once every node wears the brand material.
    pub fn is_branded(&self) -> bool {
        self.nodes.iter().all(|n| n.material == BRAND)
    }
}

/// Overwrite every node's material with the fixed brand descriptor.
///
/// The loader runs this to completion before a load is published, so no
/// partially-themed frame is ever rendered. Idempotent.
pub fn apply_brand_material(model: &mut LoadedModel) {
    for node in &mut model.nodes {
        node.material = BRAND;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with(material: MaterialDescriptor) -> MeshNode {
        MeshNode::new(
            "tri",
            vec![MeshVertex::default(); 3],
            vec![0, 1, 2],
            material,
        )
    }

    #[test]
    fn override_replaces_every_material() {
        let odd = MaterialDescriptor {
            color: [1.0, 0.0, 0.0],
            metalness: 1.0,
            roughness: 0.9,
            emissive: [0.0, 1.0, 0.0],
            emissive_intensity: 3.0,
        };
        let mut model = LoadedModel::new(
            "m",
            vec![node_with(odd), node_with(MaterialDescriptor::default())],
        );
        assert!(!model.is_branded());

        apply_brand_material(&mut model);
        assert!(model.is_branded());

        // Idempotent.
        apply_brand_material(&mut model);
        assert!(model.is_branded());
    }

    #[test]
    fn node_validity() {
        let node = node_with(MaterialDescriptor::default());
        assert!(node.is_valid());
        assert_eq!(node.triangle_count(), 1);

        let bad = MeshNode::new("bad", vec![], vec![], MaterialDescriptor::default());
        assert!(!bad.is_valid());
    }
}
