use serde::{Deserialize, Serialize};

use crate::game::{CellType, Field, Point};

/// Read-only snapshot of the field handed to agents after every timestep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    size: usize,
    /// Row-major cells, `cells[y * size + x]`
    cells: Vec<CellType>,
}

/// Create an observation from the current field
pub fn create_observation(field: &Field) -> Observation {
    Observation {
        size: field.size(),
        cells: field.as_slice().to_vec(),
    }
}

impl Observation {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[CellType] {
        &self.cells
    }

    /// Cell at the given point, `None` outside the field
    pub fn get(&self, point: Point) -> Option<CellType> {
        let size = self.size as i32;
        if point.x < 0 || point.y < 0 || point.x >= size || point.y >= size {
            return None;
        }
        Some(self.cells[point.y as usize * self.size + point.x as usize])
    }

    /// One-hot feature vector with one channel per cell type
    ///
    /// Channels follow [`CellType::ALL`] order:
    /// - 0: Empty
    /// - 1: Fruit
    /// - 2: Snake head
    /// - 3: Snake body
    /// - 4: Wall
    ///
    /// Returns a flat vector of shape [5, size, size]
    pub fn to_feature_vector(&self) -> Vec<f32> {
        let plane = self.cells.len();
        let mut data = vec![0.0; CellType::ALL.len() * plane];

        for (idx, cell) in self.cells.iter().enumerate() {
            let channel = CellType::ALL
                .iter()
                .position(|candidate| candidate == cell)
                .unwrap_or_default();
            data[channel * plane + idx] = 1.0;
        }

        data
    }
}
