//! Named, coloured drawing layers.
//!
//! Layers are presentational only: a colour never changes geometry. The
//! names and colours a pixel is drawn with come from a [`LayerTable`] handed
//! to the pattern builder, so a fab line with its own conventions can swap the
//! whole table without touching the geometry code.

/// Layer carrying the conductive pattern.
pub const PIXEL: &str = "PIXEL";
/// Layer carrying the centre-finder cross.
pub const CENTER: &str = "CENTER";
/// Layer carrying the rectangle enclosing the whole pixel.
pub const PIXEL_AREA: &str = "PIXEL_AREA";
/// Layer carrying the square enclosing the absorber.
pub const ABSORBER_AREA: &str = "ABSORBER_AREA";
/// Layer carrying the pixel index label.
pub const INDEX: &str = "INDEX";

/// A named layer with an AutoCAD Color Index colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layer {
    pub name: String,
    pub color: u8,
}

impl Layer {
    pub fn new(name: impl Into<String>, color: u8) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Which table entry a construction step draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerRole {
    Pixel,
    Center,
    PixelArea,
    AbsorberArea,
    Index,
}

impl LayerRole {
    /// Name of the role's layer in the default table.
    pub const fn default_name(self) -> &'static str {
        match self {
            LayerRole::Pixel => PIXEL,
            LayerRole::Center => CENTER,
            LayerRole::PixelArea => PIXEL_AREA,
            LayerRole::AbsorberArea => ABSORBER_AREA,
            LayerRole::Index => INDEX,
        }
    }
}

/// Ordered `{name → colour}` table, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayerTable {
    layers: Vec<Layer>,
    // role -> index into `layers`
    roles: Vec<(LayerRole, usize)>,
}

impl LayerTable {
    /// An empty table.
    pub const fn new() -> Self {
        Self {
            layers: Vec::new(),
            roles: Vec::new(),
        }
    }

    /// The table every pixel of the original fab run was drawn with.
    pub fn kid_defaults() -> Self {
        let mut table = Self::new();
        table.assign(LayerRole::Pixel, Layer::new(PIXEL, 255));
        table.assign(LayerRole::Center, Layer::new(CENTER, 120));
        table.assign(LayerRole::PixelArea, Layer::new(PIXEL_AREA, 140));
        table.assign(LayerRole::AbsorberArea, Layer::new(ABSORBER_AREA, 150));
        table.assign(LayerRole::Index, Layer::new(INDEX, 254));
        table
    }

    /// Adds `layer` unless a layer with the same name exists. Returns `false`
    /// when the name was already taken (the stored colour wins).
    pub fn insert(&mut self, layer: Layer) -> bool {
        if self.position(&layer.name).is_some() {
            return false;
        }
        self.layers.push(layer);
        true
    }

    /// Sets the layer used for `role`, replacing the role's previous layer in place.
    pub fn assign(&mut self, role: LayerRole, layer: Layer) {
        if let Some(&(_, index)) = self.roles.iter().find(|(r, _)| *r == role) {
            self.layers[index] = layer;
            return;
        }
        let index = match self.position(&layer.name) {
            Some(index) => {
                self.layers[index] = layer;
                index
            },
            None => {
                self.layers.push(layer);
                self.layers.len() - 1
            },
        };
        self.roles.push((role, index));
    }

    /// Name of the layer assigned to `role`, falling back to the default name.
    pub fn name_for(&self, role: LayerRole) -> &str {
        self.roles
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, index)| self.layers[*index].name.as_str())
            .unwrap_or(role.default_name())
    }

    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.name == name)
    }
}

impl FromIterator<Layer> for LayerTable {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        let mut table = Self::new();
        for layer in iter {
            table.insert(layer);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_kid_palette() {
        let table = LayerTable::kid_defaults();
        assert_eq!(table.len(), 5);
        assert_eq!(table.get(PIXEL).map(|l| l.color), Some(255));
        assert_eq!(table.get(INDEX).map(|l| l.color), Some(254));
        assert_eq!(table.name_for(LayerRole::Center), CENTER);
    }

    #[test]
    fn reassigning_a_role_renames_its_layer() {
        let mut table = LayerTable::kid_defaults();
        table.assign(LayerRole::Pixel, Layer::new("METAL1", 1));
        assert_eq!(table.name_for(LayerRole::Pixel), "METAL1");
        assert!(!table.contains(PIXEL));
        assert_eq!(table.len(), 5);
        assert!(!table.insert(Layer::new("METAL1", 7)));
        assert_eq!(table.get("METAL1").map(|l| l.color), Some(1));
    }
}
