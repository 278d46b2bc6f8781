//! Format-polymorphic model loader.

use corelib::error::LoadError;

use crate::fetch;
use crate::glb;
use crate::model::{LoadedModel, apply_brand_material};
use crate::mtl;
use crate::obj;
use crate::reference::AssetReference;

/// Supported asset formats. The variant is chosen once at config time
/// from the model file extension; there is no fallback chaining between
/// formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelFormat {
    /// Single-file binary glTF.
    GlbBinary,
    /// Geometry + material text pair (`.obj` with a same-stem `.mtl`).
    ObjWithMaterials,
}

impl ModelFormat {
    /// Pick the variant from a configured file name.
    pub fn for_file(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "glb" | "gltf" => Some(ModelFormat::GlbBinary),
            "obj" => Some(ModelFormat::ObjWithMaterials),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelFormat::GlbBinary => "glb",
            ModelFormat::ObjWithMaterials => "obj+mtl",
        }
    }
}

/// Fetch, parse and brand a model.
///
/// Blocking; the viewer runs this on a worker thread so the event loop
/// never waits on it. The brand override completes before the model is
/// returned, so callers never observe a partially-themed scene graph.
pub fn load(format: ModelFormat, reference: &AssetReference) -> Result<LoadedModel, LoadError> {
    let mut model = match format {
        ModelFormat::GlbBinary => load_glb(reference)?,
        ModelFormat::ObjWithMaterials => load_obj(reference)?,
    };
    apply_brand_material(&mut model);
    debug_assert!(model.is_branded());
    log::info!(
        "loaded '{}' ({} nodes, {} triangles) from {}",
        model.name,
        model.nodes.len(),
        model.triangle_count(),
        reference
    );
    Ok(model)
}

fn load_glb(reference: &AssetReference) -> Result<LoadedModel, LoadError> {
    let bytes = fetch::fetch_bytes(reference)?;
    glb::parse_glb(reference, &bytes)
}

fn load_obj(reference: &AssetReference) -> Result<LoadedModel, LoadError> {
    // The material set must be fetched and parsed in full before the
    // geometry pass begins; the OBJ parse consumes the finished set.
    let mtl_reference = reference.with_extension("mtl");
    let mtl_text = fetch_document(&mtl_reference)?;
    let materials =
        mtl::parse_mtl(&mtl_text).map_err(|e| parse_failure(&mtl_reference, e))?;
    log::debug!("preloaded {} materials from {}", materials.len(), mtl_reference);

    let obj_text = fetch_document(reference)?;
    let nodes =
        obj::parse_obj_str(&obj_text, &materials).map_err(|e| parse_failure(reference, e))?;
    Ok(LoadedModel::new(reference.file_stem(), nodes))
}

/// Fetch a text document, rejecting HTML fallback pages up front.
fn fetch_document(reference: &AssetReference) -> Result<String, LoadError> {
    let text = fetch::fetch_text(reference)?;
    if fetch::looks_like_html(text.as_bytes()) {
        return Err(LoadError::MalformedResponse {
            url: reference.to_string(),
            detail: "HTML document where a model source was expected".into(),
        });
    }
    Ok(text)
}

fn parse_failure(reference: &AssetReference, error: anyhow::Error) -> LoadError {
    LoadError::ParseFailure {
        url: reference.to_string(),
        detail: format!("{error:#}"),
    }
}
