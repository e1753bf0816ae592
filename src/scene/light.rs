//! Light types for the scene

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::fmt;
use std::ops::{Index, IndexMut};

/// The four light shapes that get their own index lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightType {
    Point,
    Spot,
    Sphere,
    Tube,
}

impl LightType {
    /// Number of light types
    pub const COUNT: usize = 4;

    /// All light types in list order
    pub const ALL: [LightType; Self::COUNT] = [
        LightType::Point,
        LightType::Spot,
        LightType::Sphere,
        LightType::Tube,
    ];

    /// Maximum number of indices a single tile can hold for this type.
    pub const fn tile_capacity(self) -> u32 {
        match self {
            LightType::Point => MAX_INDICES_POINT,
            LightType::Spot => MAX_INDICES_SPOT,
            LightType::Sphere => MAX_INDICES_SPHERE,
            LightType::Tube => MAX_INDICES_TUBE,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            LightType::Point => "point",
            LightType::Spot => "spot",
            LightType::Sphere => "sphere",
            LightType::Tube => "tube",
        }
    }
}

impl fmt::Display for LightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-tile index capacities
pub const MAX_INDICES_POINT: u32 = 1024;
pub const MAX_INDICES_SPOT: u32 = 768;
pub const MAX_INDICES_SPHERE: u32 = 768;
pub const MAX_INDICES_TUBE: u32 = 768;

/// One value per light type, indexable by [`LightType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerLightType<T>(pub [T; LightType::COUNT]);

impl<T> PerLightType<T> {
    pub fn from_fn(f: impl FnMut(LightType) -> T) -> Self {
        Self(LightType::ALL.map(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightType, &T)> {
        LightType::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<LightType> for PerLightType<T> {
    type Output = T;

    fn index(&self, ty: LightType) -> &T {
        &self.0[ty.index()]
    }
}

impl<T> IndexMut<LightType> for PerLightType<T> {
    fn index_mut(&mut self, ty: LightType) -> &mut T {
        &mut self.0[ty.index()]
    }
}

/// World-space bounding sphere of a light's influence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Reduces a light record to the sphere used for culling.
pub trait LightBounds {
    const TYPE: LightType;

    fn bounding_sphere(&self) -> BoundingSphere;
}

/// GPU point light record
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointLightData {
    pub position_ws: Vec3,
    pub attenuation_radius: f32,
    pub color: Vec3,
    pub intensity: f32,
}

impl PointLightData {
    pub fn new(position_ws: Vec3, attenuation_radius: f32) -> Self {
        Self {
            position_ws,
            attenuation_radius,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }

    pub fn with_color(mut self, color: Vec3, intensity: f32) -> Self {
        self.color = color;
        self.intensity = intensity;
        self
    }
}

impl LightBounds for PointLightData {
    const TYPE: LightType = LightType::Point;

    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position_ws, self.attenuation_radius)
    }
}

/// GPU spot light record
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpotLightData {
    pub position_ws: Vec3,
    pub attenuation_radius: f32,
    pub direction: Vec3,
    pub intensity: f32,
    pub color: Vec3,
    /// cos(inner_angle)
    pub cos_inner: f32,
    /// cos(outer_angle)
    pub cos_outer: f32,
    pub _padding: [f32; 3],
}

impl SpotLightData {
    pub fn new(position_ws: Vec3, direction: Vec3, attenuation_radius: f32) -> Self {
        Self {
            position_ws,
            attenuation_radius,
            direction: direction.normalize_or_zero(),
            intensity: 1.0,
            color: Vec3::ONE,
            cos_inner: 0.3f32.cos(),
            cos_outer: 0.5f32.cos(),
            _padding: [0.0; 3],
        }
    }

    /// Set the cone angles in radians
    pub fn with_angles(mut self, inner_angle: f32, outer_angle: f32) -> Self {
        self.cos_inner = inner_angle.cos();
        self.cos_outer = outer_angle.cos();
        self
    }
}

impl LightBounds for SpotLightData {
    const TYPE: LightType = LightType::Spot;

    // The cone is not used for culling; the full attenuation sphere is.
    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position_ws, self.attenuation_radius)
    }
}

/// GPU sphere (area) light record
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SphereLightData {
    pub position_ws: Vec3,
    pub attenuation_radius: f32,
    pub color: Vec3,
    pub intensity: f32,
    /// Radius of the emitting sphere itself
    pub source_radius: f32,
    pub _padding: [f32; 3],
}

impl SphereLightData {
    pub fn new(position_ws: Vec3, source_radius: f32, attenuation_radius: f32) -> Self {
        Self {
            position_ws,
            attenuation_radius,
            color: Vec3::ONE,
            intensity: 1.0,
            source_radius,
            _padding: [0.0; 3],
        }
    }
}

impl LightBounds for SphereLightData {
    const TYPE: LightType = LightType::Sphere;

    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position_ws, self.attenuation_radius)
    }
}

/// GPU tube (capsule) light record
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TubeLightData {
    pub position0: Vec3,
    pub attenuation_radius: f32,
    pub position1: Vec3,
    pub tube_radius: f32,
    pub color: Vec3,
    pub intensity: f32,
}

impl TubeLightData {
    pub fn new(position0: Vec3, position1: Vec3, tube_radius: f32, attenuation_radius: f32) -> Self {
        Self {
            position0,
            attenuation_radius,
            position1,
            tube_radius,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

impl LightBounds for TubeLightData {
    const TYPE: LightType = LightType::Tube;

    /// Approximates the capsule by a sphere at the segment midpoint.
    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new((self.position0 + self.position1) / 2.0, self.attenuation_radius)
    }
}

/// Read-only view of the four global light arrays for one frame.
///
/// The light count of each type is the length of its slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneLights<'a> {
    pub point: &'a [PointLightData],
    pub spot: &'a [SpotLightData],
    pub sphere: &'a [SphereLightData],
    pub tube: &'a [TubeLightData],
}

impl<'a> SceneLights<'a> {
    pub fn new(
        point: &'a [PointLightData],
        spot: &'a [SpotLightData],
        sphere: &'a [SphereLightData],
        tube: &'a [TubeLightData],
    ) -> Self {
        Self { point, spot, sphere, tube }
    }

    pub fn counts(&self) -> PerLightType<usize> {
        PerLightType([self.point.len(), self.spot.len(), self.sphere.len(), self.tube.len()])
    }
}
