//! Wavefront MTL parser producing the material set the OBJ parse consumes.

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};

use corelib::material::MaterialDescriptor;

/// One source material as authored in the `.mtl` file.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceMaterial {
    pub name: String,
    /// Ka
    pub ambient: [f32; 3],
    /// Kd
    pub diffuse: [f32; 3],
    /// Ks
    pub specular: [f32; 3],
    /// Ke
    pub emissive: [f32; 3],
    /// Ns
    pub specular_exponent: f32,
    /// d (1.0 = opaque)
    pub dissolve: f32,
    /// illum
    pub illumination: u8,
}

impl SourceMaterial {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ambient: [0.0, 0.0, 0.0],
            diffuse: [1.0, 1.0, 1.0],
            specular: [0.0, 0.0, 0.0],
            emissive: [0.0, 0.0, 0.0],
            specular_exponent: 0.0,
            dissolve: 1.0,
            illumination: 1,
        }
    }

    /// Rough descriptor mapping. Only alive until the brand override runs,
    /// so glossiness folds into roughness without ceremony.
    pub fn to_descriptor(&self) -> MaterialDescriptor {
        let glossiness = (self.specular_exponent / 1000.0).clamp(0.0, 1.0);
        let glows = self.emissive.iter().any(|c| *c > 0.0);
        MaterialDescriptor {
            color: self.diffuse,
            metalness: 0.0,
            roughness: 1.0 - glossiness,
            emissive: self.emissive,
            emissive_intensity: if glows { 1.0 } else { 0.0 },
        }
    }
}

/// Named materials keyed by `newmtl` name.
#[derive(Clone, Debug, Default)]
pub struct MaterialSet {
    materials: HashMap<String, SourceMaterial>,
}

impl MaterialSet {
    pub fn get(&self, name: &str) -> Option<&SourceMaterial> {
        self.materials.get(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    fn insert(&mut self, material: SourceMaterial) {
        self.materials.insert(material.name.clone(), material);
    }
}

/// Parse an MTL document. Directives that carry no surface appearance
/// (texture maps, transmission filters and the like) are ignored.
pub fn parse_mtl(contents: &str) -> Result<MaterialSet> {
    let mut set = MaterialSet::default();
    let mut current: Option<SourceMaterial> = None;

    for (line_no, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let tag = parts
            .next()
            .ok_or_else(|| anyhow!("Malformed MTL line {}: '{}'", line_no + 1, trimmed))?;

        if tag == "newmtl" {
            let name = parts
                .next()
                .ok_or_else(|| anyhow!("newmtl without a name on line {}", line_no + 1))?;
            if let Some(done) = current.replace(SourceMaterial::named(name)) {
                set.insert(done);
            }
            continue;
        }

        let material = current
            .as_mut()
            .ok_or_else(|| anyhow!("'{}' before any newmtl on line {}", tag, line_no + 1))?;

        match tag {
            "Ka" => material.ambient = parse_color(&mut parts, line_no)?,
            "Kd" => material.diffuse = parse_color(&mut parts, line_no)?,
            "Ks" => material.specular = parse_color(&mut parts, line_no)?,
            "Ke" => material.emissive = parse_color(&mut parts, line_no)?,
            "Ns" => material.specular_exponent = parse_f32(parts.next(), line_no, "Ns")?,
            "d" => material.dissolve = parse_f32(parts.next(), line_no, "d")?,
            "illum" => {
                let token = parts
                    .next()
                    .ok_or_else(|| anyhow!("Missing illum value on line {}", line_no + 1))?;
                material.illumination = token
                    .parse::<u8>()
                    .with_context(|| format!("Failed to parse illum on line {}", line_no + 1))?;
            }
            _ => {
                // map_Kd / map_Ks / Ni / Tr / ...
            }
        }
    }

    if let Some(done) = current {
        set.insert(done);
    }
    Ok(set)
}

fn parse_color<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<[f32; 3]> {
    let r = parse_f32(parts.next(), line_no, "red channel")?;
    let g = parse_f32(parts.next(), line_no, "green channel")?;
    let b = parse_f32(parts.next(), line_no, "blue channel")?;
    Ok([r, g, b])
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &str) -> Result<f32> {
    let token = value.ok_or_else(|| anyhow!("Missing {} on line {}", what, line_no + 1))?;
    token
        .parse::<f32>()
        .with_context(|| format!("Failed to parse {} on line {}", what, line_no + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_materials() {
        let src = r#"
            # brand test palette
            newmtl shell
            Ka 0.1 0.1 0.1
            Kd 0.9 0.4 0.2
            Ks 0.5 0.5 0.5
            Ns 250.0
            d 1.0
            illum 2

            newmtl glow
            Kd 0.2 0.2 0.2
            Ke 1.0 1.0 0.5
        "#;
        let set = parse_mtl(src).expect("parse mtl");
        assert_eq!(set.len(), 2);

        let shell = set.get("shell").expect("shell");
        assert_eq!(shell.diffuse, [0.9, 0.4, 0.2]);
        assert_eq!(shell.specular_exponent, 250.0);
        assert_eq!(shell.illumination, 2);

        let glow = set.get("glow").expect("glow");
        assert_eq!(glow.emissive, [1.0, 1.0, 0.5]);
        assert_eq!(glow.to_descriptor().emissive_intensity, 1.0);
    }

    #[test]
    fn directive_before_newmtl_is_rejected() {
        let err = parse_mtl("Kd 1.0 0.0 0.0\n").unwrap_err();
        assert!(err.to_string().contains("before any newmtl"));
    }

    #[test]
    fn empty_input_yields_empty_set() {
        let set = parse_mtl("# nothing here\n").expect("parse");
        assert!(set.is_empty());
    }

    #[test]
    fn descriptor_mapping_folds_gloss_into_roughness() {
        let src = "newmtl m\nKd 0.5 0.5 0.5\nNs 1000.0\n";
        let set = parse_mtl(src).expect("parse");
        let descriptor = set.get("m").expect("m").to_descriptor();
        assert_eq!(descriptor.roughness, 0.0);
        assert_eq!(descriptor.emissive_intensity, 0.0);
    }
}
