//! Static material table for shaft segments.

/// Physical and display properties of a shaft material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub id: &'static str,
    pub name: &'static str,
    /// kg/m^3
    pub density: f64,
    /// Pa
    pub youngs_modulus: f64,
    /// Display color (hex).
    pub color: &'static str,
    pub description: &'static str,
}

pub const MATERIALS: [Material; 3] = [
    Material {
        id: "steel",
        name: "Steel",
        density: 7850.0,
        youngs_modulus: 210e9,
        color: "#94a3b8",
        description: "High strength, heavy material",
    },
    Material {
        id: "aluminum",
        name: "Aluminum",
        density: 2700.0,
        youngs_modulus: 70e9,
        color: "#cbd5e1",
        description: "Lightweight, lower stiffness",
    },
    Material {
        id: "titanium",
        name: "Titanium",
        density: 4500.0,
        youngs_modulus: 110e9,
        color: "#9ca3af",
        description: "High strength-to-weight ratio",
    },
];

pub const DEFAULT_MATERIAL_ID: &str = "steel";

/// Lookup by id; unknown ids fall back to the first (default) material so a
/// dataset with a stray id still renders.
pub fn material_by_id(id: &str) -> &'static Material {
    MATERIALS.iter().find(|m| m.id == id).unwrap_or(&MATERIALS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id_exact() {
        assert_eq!(material_by_id("titanium").density, 4500.0);
        assert_eq!(material_by_id("aluminum").youngs_modulus, 70e9);
    }

    #[test]
    fn test_unknown_id_falls_back_to_steel() {
        let m = material_by_id("unobtainium");
        assert_eq!(m.id, "steel");
        assert_eq!(m.color, "#94a3b8");
    }

    #[test]
    fn test_default_id_resolves() {
        assert_eq!(material_by_id(DEFAULT_MATERIAL_ID).name, "Steel");
    }
}
