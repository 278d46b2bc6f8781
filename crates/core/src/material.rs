//! Surface-appearance descriptors and the fixed brand material.

/// Renderer-agnostic material descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialDescriptor {
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

/// Brand yellow, #f9ff81.
pub const BRAND_COLOR: [f32; 3] = [249.0 / 255.0, 1.0, 129.0 / 255.0];

/// The one material every shipped mesh wears, regardless of what the
/// source asset authored.
pub const BRAND: MaterialDescriptor = MaterialDescriptor {
    color: BRAND_COLOR,
    metalness: 0.5,
    roughness: 0.2,
    emissive: BRAND_COLOR,
    emissive_intensity: 0.2,
};

impl Default for MaterialDescriptor {
    /// Neutral white matte, used for source materials before the brand
    /// override runs.
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            metalness: 0.0,
            roughness: 1.0,
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_material_values() {
        assert_eq!(BRAND.metalness, 0.5);
        assert_eq!(BRAND.roughness, 0.2);
        assert_eq!(BRAND.color, BRAND_COLOR);
        assert_eq!(BRAND.emissive, BRAND_COLOR);
        assert_eq!(BRAND.emissive_intensity, 0.2);
    }

    #[test]
    fn default_is_not_brand() {
        assert_ne!(MaterialDescriptor::default(), BRAND);
    }
}
