//! Binary glTF (GLB) loading via the `gltf` crate.

use corelib::error::LoadError;
use corelib::material::MaterialDescriptor;

use crate::fetch::looks_like_html;
use crate::model::{LoadedModel, MeshNode, MeshVertex};
use crate::reference::AssetReference;

const GLB_MAGIC: &[u8; 4] = b"glTF";

/// Parse GLB bytes into a model.
///
/// The container sniff separates the "wrong body" failure (an HTML error
/// page or other non-GLB payload, `MalformedResponse`) from a genuine
/// parser rejection of magic-valid bytes (`ParseFailure`).
pub fn parse_glb(reference: &AssetReference, bytes: &[u8]) -> Result<LoadedModel, LoadError> {
    if bytes.len() < 4 || &bytes[..4] != GLB_MAGIC {
        let detail = if looks_like_html(bytes) {
            "HTML document where a binary model was expected"
        } else {
            "missing glTF container magic"
        };
        return Err(LoadError::MalformedResponse {
            url: reference.to_string(),
            detail: detail.into(),
        });
    }

    let (document, buffers, _images) =
        gltf::import_slice(bytes).map_err(|e| LoadError::ParseFailure {
            url: reference.to_string(),
            detail: e.to_string(),
        })?;

    let mut nodes = Vec::new();
    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_default();
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|coords| coords.into_f32().collect())
                .unwrap_or_default();

            let vertices: Vec<MeshVertex> = positions
                .iter()
                .enumerate()
                .map(|(i, position)| {
                    MeshVertex::new(
                        *position,
                        normals.get(i).copied().unwrap_or([0.0, 0.0, 1.0]),
                        uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                    )
                })
                .collect();
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..vertices.len() as u32).collect(),
            };

            let name = mesh
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("mesh{}", nodes.len()));
            nodes.push(MeshNode::new(
                name,
                vertices,
                indices,
                MaterialDescriptor::default(),
            ));
        }
    }

    let model = LoadedModel::new(reference.file_stem(), nodes);
    if model.triangle_count() == 0 {
        return Err(LoadError::ParseFailure {
            url: reference.to_string(),
            detail: "model contained no triangles".into(),
        });
    }
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> AssetReference {
        AssetReference::from_url("/models/swirl.glb")
    }

    /// Build a GLB container holding only a JSON chunk.
    fn glb_with_json(json: &str) -> Vec<u8> {
        let mut chunk = json.as_bytes().to_vec();
        while chunk.len() % 4 != 0 {
            chunk.push(b' ');
        }
        let total = 12 + 8 + chunk.len();
        let mut out = Vec::new();
        out.extend_from_slice(GLB_MAGIC);
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(chunk.len() as u32).to_le_bytes());
        out.extend_from_slice(b"JSON");
        out.extend_from_slice(&chunk);
        out
    }

    #[test]
    fn html_body_is_a_malformed_response() {
        let err = parse_glb(&reference(), b"<!DOCTYPE html><html>404</html>").unwrap_err();
        match err {
            LoadError::MalformedResponse { detail, .. } => {
                assert!(detail.contains("HTML"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_glb_bytes_are_a_malformed_response() {
        let err = parse_glb(&reference(), &[0u8, 1, 2, 3, 4, 5, 6, 7]).unwrap_err();
        assert!(matches!(err, LoadError::MalformedResponse { .. }));
    }

    #[test]
    fn truncated_container_is_a_parse_failure() {
        // Valid magic, nothing else.
        let err = parse_glb(&reference(), b"glTF").unwrap_err();
        assert!(matches!(err, LoadError::ParseFailure { .. }));
    }

    #[test]
    fn meshless_document_is_a_parse_failure() {
        let bytes = glb_with_json(r#"{"asset":{"version":"2.0"}}"#);
        let err = parse_glb(&reference(), &bytes).unwrap_err();
        match err {
            LoadError::ParseFailure { detail, .. } => {
                assert!(detail.contains("no triangles"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
