//! Collision between cable particles and a static environment.
//!
//! The environment is reached through [`CollisionWorld`], a sphere-cast query
//! the host implements over whatever spatial structure it already has. A few
//! analytic colliders are provided for simple scenes and tests.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// Friction values at or below this are treated as frictionless.
pub const FRICTION_EPSILON: f32 = 1e-4;

/// Result of a successful sphere cast.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereCastHit<F: Float> {
    /// Contact point on the collider surface.
    pub point: Vec3<F>,
    /// Unit surface normal at the contact.
    pub normal: Vec3<F>,
    /// Distance the sphere travelled before touching.
    pub distance: F,
}

/// Sphere-cast query over a static world.
pub trait CollisionWorld<F: Float> {
    /// Sweep a sphere of `radius` from `origin` along unit `direction` for at
    /// most `max_distance`. Returns the first contact, if any.
    fn sphere_cast(
        &self,
        origin: Vec3<F>,
        radius: F,
        direction: Vec3<F>,
        max_distance: F,
    ) -> Option<SphereCastHit<F>>;
}

/// A world with nothing in it. Every cast misses.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptyWorld;

impl<F: Float> CollisionWorld<F> for EmptyWorld {
    fn sphere_cast(&self, _: Vec3<F>, _: F, _: Vec3<F>, _: F) -> Option<SphereCastHit<F>> {
        None
    }
}

/// One-sided infinite plane `dot(normal, x) == offset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane<F: Float> {
    pub normal: Vec3<F>,
    pub offset: F,
}

impl<F: Float> Plane<F> {
    pub fn new(normal: Vec3<F>, offset: F) -> Self {
        Plane { normal: normal.normalize(), offset }
    }

    /// Horizontal ground at height `y`.
    pub fn ground(y: F) -> Self {
        Plane { normal: Vec3::up(), offset: y }
    }

    pub fn signed_distance(&self, point: Vec3<F>) -> F {
        self.normal.dot(point) - self.offset
    }
}

impl<F: Float> CollisionWorld<F> for Plane<F> {
    fn sphere_cast(
        &self,
        origin: Vec3<F>,
        radius: F,
        direction: Vec3<F>,
        max_distance: F,
    ) -> Option<SphereCastHit<F>> {
        let s = self.signed_distance(origin);
        if s <= -radius {
            return None; // fully behind the surface
        }
        if s < radius {
            // Already touching at the start of the sweep.
            return Some(SphereCastHit {
                point: origin - self.normal.scale(s),
                normal: self.normal,
                distance: F::zero(),
            });
        }

        let direction = direction.normalize();
        let approach = -self.normal.dot(direction);
        if approach <= F::zero() {
            return None;
        }
        let t = (s - radius) / approach;
        if t > max_distance {
            return None;
        }
        let center = origin + direction.scale(t);
        Some(SphereCastHit {
            point: center - self.normal.scale(radius),
            normal: self.normal,
            distance: t,
        })
    }
}

/// Solid static ball.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
}

impl<F: Float> Sphere<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Self {
        Sphere { center, radius }
    }

    fn surface_hit(&self, sphere_center: Vec3<F>, distance: F) -> SphereCastHit<F> {
        let mut normal = (sphere_center - self.center).normalize();
        if normal == Vec3::zero() {
            normal = Vec3::up();
        }
        SphereCastHit {
            point: self.center + normal.scale(self.radius),
            normal,
            distance,
        }
    }
}

impl<F: Float> CollisionWorld<F> for Sphere<F> {
    fn sphere_cast(
        &self,
        origin: Vec3<F>,
        radius: F,
        direction: Vec3<F>,
        max_distance: F,
    ) -> Option<SphereCastHit<F>> {
        let reach = self.radius + radius;
        let m = origin - self.center;
        let c = m.length_sq() - reach * reach;
        if c < F::zero() {
            return Some(self.surface_hit(origin, F::zero()));
        }

        let direction = direction.normalize();
        let b = m.dot(direction);
        if b > F::zero() {
            return None; // outside and moving away
        }
        let disc = b * b - c;
        if disc < F::zero() {
            return None;
        }
        let t = -b - disc.sqrt();
        if t > max_distance {
            return None;
        }
        Some(self.surface_hit(origin + direction.scale(t), t))
    }
}

/// Heterogeneous static collider, for building scenes out of primitives.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StaticCollider<F: Float> {
    Plane(Plane<F>),
    Sphere(Sphere<F>),
}

impl<F: Float> CollisionWorld<F> for StaticCollider<F> {
    fn sphere_cast(
        &self,
        origin: Vec3<F>,
        radius: F,
        direction: Vec3<F>,
        max_distance: F,
    ) -> Option<SphereCastHit<F>> {
        match self {
            StaticCollider::Plane(p) => p.sphere_cast(origin, radius, direction, max_distance),
            StaticCollider::Sphere(s) => s.sphere_cast(origin, radius, direction, max_distance),
        }
    }
}

/// A list of colliders reports the nearest hit.
impl<F: Float, C: CollisionWorld<F>> CollisionWorld<F> for [C] {
    fn sphere_cast(
        &self,
        origin: Vec3<F>,
        radius: F,
        direction: Vec3<F>,
        max_distance: F,
    ) -> Option<SphereCastHit<F>> {
        self.iter()
            .filter_map(|c| c.sphere_cast(origin, radius, direction, max_distance))
            .fold(None, |nearest: Option<SphereCastHit<F>>, hit| match nearest {
                Some(n) if n.distance <= hit.distance => Some(n),
                _ => Some(hit),
            })
    }
}

/// Keeps free particles out of the static world.
///
/// Each free particle casts a sphere straight down from its previous
/// position. On a hit the particle is placed at the contact, the normal
/// component of its implicit velocity is removed, and the tangential
/// component is damped by `friction`.
#[derive(Clone, Debug)]
pub struct CollisionResolver<F: Float> {
    pub radius: F,
    pub friction: F,
}

impl<F: Float> CollisionResolver<F> {
    pub fn new(radius: F, friction: F) -> Self {
        CollisionResolver { radius, friction }
    }

    /// Resolver for a tube of the given width.
    pub fn for_width(width: F, friction: F) -> Self {
        CollisionResolver::new(width * F::half(), friction)
    }

    /// Returns the number of particles that made contact.
    pub fn resolve<W>(&self, particles: &mut [Particle<F>], world: &W) -> usize
    where
        W: CollisionWorld<F> + ?Sized,
    {
        let mut contacts = 0;
        for particle in particles.iter_mut().filter(|p| p.is_free()) {
            let hit = world.sphere_cast(particle.old_position, self.radius, Vec3::down(), self.radius);
            if let Some(hit) = hit {
                self.respond(particle, &hit);
                contacts += 1;
            }
        }
        contacts
    }

    /// Apply the contact response for a single particle.
    pub fn respond(&self, particle: &mut Particle<F>, hit: &SphereCastHit<F>) {
        particle.position = hit.point;

        let delta = particle.velocity();
        let normal_delta = hit.normal.dot(delta);
        let plane_delta = delta - hit.normal.scale(normal_delta);

        particle.old_position += hit.normal.scale(normal_delta);

        if self.friction > F::from_f32(FRICTION_EPSILON) {
            particle.old_position += plane_delta.scale(self.friction);
        }
    }
}
