/// Surface materials for front and back faces
use crate::color::Color;

/// Specular highlight layered over a diffuse colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Specular {
    pub color: Color,
    pub power: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Color,
    pub specular: Option<Specular>,
}

impl Material {
    pub const HIGHLIGHT: Specular = Specular {
        color: Color::argb(128, 255, 255, 255),
        power: 30.0,
    };

    pub fn diffuse(color: Color) -> Self {
        Self {
            diffuse: color,
            specular: None,
        }
    }

    pub fn with_specular(mut self, specular: Specular) -> Self {
        self.specular = Some(specular);
        self
    }

    /// Outward-facing material: the colour plus a soft white highlight.
    pub fn front(color: Color) -> Self {
        Self::diffuse(color).with_specular(Self::HIGHLIGHT)
    }

    /// Inward-facing material: a darker, slightly more opaque diffuse colour.
    pub fn back(color: Color) -> Self {
        Self::diffuse(color.darkened())
    }

    pub fn is_opaque(&self) -> bool {
        self.diffuse.is_opaque()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_and_back() {
        let color = Color::argb(96, 100, 200, 50);
        let front = Material::front(color);
        assert_eq!(front.diffuse, color);
        assert_eq!(front.specular, Some(Material::HIGHLIGHT));

        let back = Material::back(color);
        assert_eq!(back.diffuse, Color::argb(105, 90, 180, 45));
        assert!(back.specular.is_none());
        assert!(!back.is_opaque());
    }
}
