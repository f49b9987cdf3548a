/// Control-point storage for editable curves
///
/// The store is the single owner of every control-point position. Curves refer
/// to points by [`ControlPointId`] and borrow the store while they are evaluated,
/// so a point moved through the store is picked up by the next evaluation
/// without any shared mutable handles.
use std::ops::Index;

use nalgebra::{Point3, Vector3};

use crate::error::ControlPointError;

/// Stable handle to a point in a [`ControlPointStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlPointId(pub(crate) usize);

impl ControlPointId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlPointStore {
    positions: Vec<Point3<f32>>,
}

impl ControlPointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: impl IntoIterator<Item = Point3<f32>>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
        }
    }

    /// Fill a store with `count` points spread uniformly in a cube of side
    /// `spread` centred on the origin. The same seed always gives the same points.
    pub fn scatter(count: usize, spread: f32, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut coord = || (rng.f32() - 0.5) * spread;
        let positions = (0..count)
            .map(|_| {
                let x = coord();
                let y = coord();
                let z = coord();
                Point3::new(x, y, z)
            })
            .collect();
        Self { positions }
    }

    pub fn insert(&mut self, position: Point3<f32>) -> ControlPointId {
        self.positions.push(position);
        ControlPointId(self.positions.len() - 1)
    }

    pub fn get(&self, id: ControlPointId) -> Option<Point3<f32>> {
        self.positions.get(id.0).copied()
    }

    pub fn contains(&self, id: ControlPointId) -> bool {
        id.0 < self.positions.len()
    }

    pub fn set(&mut self, id: ControlPointId, position: Point3<f32>) -> Result<(), ControlPointError> {
        let slot = self
            .positions
            .get_mut(id.0)
            .ok_or(ControlPointError::UnknownId(id.0))?;
        *slot = position;
        Ok(())
    }

    pub fn translate(&mut self, id: ControlPointId, offset: Vector3<f32>) -> Result<(), ControlPointError> {
        let slot = self
            .positions
            .get_mut(id.0)
            .ok_or(ControlPointError::UnknownId(id.0))?;
        *slot += offset;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Ids of every stored point, in insertion order
    pub fn ids(&self) -> impl Iterator<Item = ControlPointId> + '_ {
        (0..self.positions.len()).map(ControlPointId)
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }
}

impl Index<ControlPointId> for ControlPointStore {
    type Output = Point3<f32>;

    fn index(&self, id: ControlPointId) -> &Self::Output {
        &self.positions[id.0]
    }
}
