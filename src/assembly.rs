//! Tiling pixel documents into an array.
//!
//! Every entry of an array places one pixel document with its own rigid
//! transform. The merge is a pure fold: sources are never mutated, entries are
//! transformed independently and concatenated in declared order.

use crate::document::{ArrayDocument, Document, PixelDocument};
use crate::errors::AssemblyError;
use crate::float_types::Real;
use crate::layers::LayerTable;
use crate::traits::TransformOps;
use crate::transform::{Mirror, RigidTransform};
use nalgebra::Vector2;
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Placement of one pixel in the array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayEntry {
    /// Index of the source pixel document.
    pub pixel: usize,
    pub position: Vector2<Real>,
    /// Degrees, counter-clockwise.
    pub rotation: Real,
    pub mirror: Mirror,
}

impl ArrayEntry {
    pub fn new(pixel: usize, x: Real, y: Real, rotation: Real, mirror: Mirror) -> Self {
        Self {
            pixel,
            position: Vector2::new(x, y),
            rotation,
            mirror,
        }
    }

    pub fn transform(&self) -> RigidTransform {
        RigidTransform::new(self.mirror, self.rotation, self.position)
    }
}

/// Zips the placement columns of an array table into entries for pixels
/// `1..=n`, the i-th row placing pixel `i + 1`.
pub fn entries_from_columns(
    positions: &[(Real, Real)],
    rotations: &[Real],
    mirrors: &[Mirror],
) -> Result<Vec<ArrayEntry>, AssemblyError> {
    if positions.len() != rotations.len() || positions.len() != mirrors.len() {
        return Err(AssemblyError::LengthMismatch {
            positions: positions.len(),
            rotations: rotations.len(),
            mirrors: mirrors.len(),
        });
    }
    Ok(positions
        .iter()
        .zip(rotations)
        .zip(mirrors)
        .enumerate()
        .map(|(i, ((&(x, y), &rotation), &mirror))| ArrayEntry::new(i + 1, x, y, rotation, mirror))
        .collect())
}

/// Pixel documents by index, merged on demand.
#[derive(Debug, Clone, Default)]
pub struct ArrayAssembler {
    pixels: BTreeMap<usize, PixelDocument>,
}

impl ArrayAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the document of pixel `index`, returning the one it replaces.
    pub fn insert(&mut self, index: usize, document: PixelDocument) -> Option<PixelDocument> {
        self.pixels.insert(index, document)
    }

    pub fn from_documents(documents: impl IntoIterator<Item = (usize, PixelDocument)>) -> Self {
        Self {
            pixels: documents.into_iter().collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&PixelDocument> {
        self.pixels.get(&index)
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Places every entry's pixel and concatenates the results in entry
    /// order. All sources are checked before anything is merged.
    ///
    /// ## Errors
    /// [`AssemblyError::MissingPixel`] for the first entry naming a pixel that
    /// was never inserted; no partial array is produced.
    pub fn assemble(&self, entries: &[ArrayEntry]) -> Result<ArrayDocument, AssemblyError> {
        let sources = entries
            .iter()
            .enumerate()
            .map(|(entry, placement)| {
                self.pixels
                    .get(&placement.pixel)
                    .map(|document| (document, placement.transform()))
                    .ok_or(AssemblyError::MissingPixel {
                        entry,
                        pixel: placement.pixel,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        #[cfg(feature = "parallel")]
        let placed: Vec<Document> = sources
            .par_iter()
            .map(|(document, transform)| document.transform(transform))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let placed: Vec<Document> = sources
            .iter()
            .map(|(document, transform)| document.transform(transform))
            .collect();

        let mut array = Document::new(merge_layers(placed.iter().map(|doc| &doc.layers)));
        for document in placed {
            array.entities.extend(document.entities);
        }
        crate::log::debug!(
            entries = entries.len(),
            entities = array.len(),
            layers = array.layers.len(),
            "assembled array"
        );
        Ok(array)
    }
}

/// Union of the tables by layer name; the first colour seen for a name wins.
fn merge_layers<'a>(tables: impl Iterator<Item = &'a LayerTable>) -> LayerTable {
    let mut merged = LayerTable::new();
    for table in tables {
        for layer in table.iter() {
            match merged.get(&layer.name) {
                Some(existing) if existing.color != layer.color => {
                    crate::log::warn!(
                        layer = %layer.name,
                        kept = existing.color,
                        ignored = layer.color,
                        "layer colour conflict"
                    );
                },
                Some(_) => {},
                None => {
                    merged.insert(layer.clone());
                },
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Entity, Primitive};
    use crate::layers::Layer;

    fn pixel(color: u8) -> PixelDocument {
        let mut table = LayerTable::new();
        table.insert(Layer::new("PIXEL", color));
        let mut document = Document::new(table);
        document.push(Entity::new("PIXEL", Primitive::open(&[[0.0, 0.0], [1.0, 0.0]])));
        document
    }

    #[test]
    fn columns_must_agree() {
        let err = entries_from_columns(&[(0.0, 0.0), (1.0, 0.0)], &[0.0], &[Mirror::None; 2])
            .unwrap_err();
        assert_eq!(
            err,
            AssemblyError::LengthMismatch {
                positions: 2,
                rotations: 1,
                mirrors: 2
            }
        );
        let entries = entries_from_columns(&[(5.0, 6.0)], &[90.0], &[Mirror::X]).unwrap();
        assert_eq!(entries, vec![ArrayEntry::new(1, 5.0, 6.0, 90.0, Mirror::X)]);
    }

    #[test]
    fn first_colour_wins() {
        let assembler = ArrayAssembler::from_documents([(1, pixel(5)), (2, pixel(9))]);
        let entries = [
            ArrayEntry::new(1, 0.0, 0.0, 0.0, Mirror::None),
            ArrayEntry::new(2, 10.0, 0.0, 0.0, Mirror::None),
        ];
        let array = assembler.assemble(&entries).unwrap();
        assert_eq!(array.layers.len(), 1);
        assert_eq!(array.layers.get("PIXEL").map(|l| l.color), Some(5));
        assert_eq!(array.len(), 2);
    }
}
