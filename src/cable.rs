//! The particle chain a cable is made of.

use crate::anchor::{AnchorRef, Endpoint};
use crate::config::CableConfig;
use crate::error::{CableError, Result};
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Ordered chain of `segment_count + 1` particles with uniform rest length.
///
/// The first and last particles are always bound. The particle count is
/// fixed for the cable's lifetime. Particles are read-only from outside the
/// crate; bindings change only through [`bind`](Self::bind),
/// [`unbind`](Self::unbind) and [`set_anchor`](Self::set_anchor).
///
/// ```compile_fail
/// use tether::{AnchorRef, Cable, CableConfig, Vec3};
///
/// let mut cable = Cable::new(
///     &CableConfig::<f32>::new(),
///     AnchorRef::fixed(Vec3::zero()),
///     AnchorRef::fixed(Vec3::new(1.0, 0.0, 0.0)),
/// )
/// .unwrap();
/// cable.particles_mut()[0].unbind();
/// ```
#[derive(Clone, Debug)]
pub struct Cable<F: Float> {
    particles: AllocVec<Particle<F>>,
    rest_length: F,
}

impl<F: Float> Cable<F> {
    /// Lay particles out along the line from `start` towards `end`, spaced by
    /// the rest length, then pin the two ends to their anchors.
    pub fn new(config: &CableConfig<F>, start: AnchorRef<F>, end: AnchorRef<F>) -> Result<Self> {
        config.validate()?;
        let segments = config.resolved_segment_count();
        let rest_length = config.rest_length()?;

        let origin = start.pose();
        let mut direction = (end.pose() - origin).normalize();
        if direction == Vec3::zero() {
            direction = Vec3::down();
        }

        let mut particles = AllocVec::with_capacity(segments + 1);
        for i in 0..=segments {
            let offset = direction.scale(rest_length * F::from_usize(i));
            particles.push(Particle::new(origin + offset));
        }
        particles[0].bind(start);
        particles[segments].bind(end);

        log::debug!(
            "created cable: {} segments, rest length {}, span {}",
            segments,
            rest_length,
            start.pose().distance(end.pose())
        );

        Ok(Cable { particles, rest_length })
    }

    /// Build from optional anchors, reporting which endpoint is missing.
    pub fn with_anchors(
        config: &CableConfig<F>,
        start: Option<AnchorRef<F>>,
        end: Option<AnchorRef<F>>,
    ) -> Result<Self> {
        let start = start.ok_or(CableError::MissingAnchor(Endpoint::Start))?;
        let end = end.ok_or(CableError::MissingAnchor(Endpoint::End))?;
        Cable::new(config, start, end)
    }

    pub fn rest_length(&self) -> F {
        self.rest_length
    }

    pub fn segment_count(&self) -> usize {
        self.particles.len() - 1
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Rest length of the whole chain.
    pub fn total_length(&self) -> F {
        self.rest_length * F::from_usize(self.segment_count())
    }

    fn endpoint_index(&self, endpoint: Endpoint) -> usize {
        match endpoint {
            Endpoint::Start => 0,
            Endpoint::End => self.segment_count(),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.particles.len() {
            return Err(CableError::ParticleOutOfBounds { index, count: self.particles.len() });
        }
        Ok(())
    }

    /// Pin any particle to an anchor. Re-binding an endpoint replaces its anchor.
    pub fn bind(&mut self, index: usize, anchor: AnchorRef<F>) -> Result<()> {
        self.check_index(index)?;
        self.particles[index].bind(anchor);
        Ok(())
    }

    /// Release an interior particle. Endpoints cannot be released.
    pub fn unbind(&mut self, index: usize) -> Result<Option<AnchorRef<F>>> {
        self.check_index(index)?;
        if index == 0 || index == self.segment_count() {
            return Err(CableError::EndpointBinding { index });
        }
        Ok(self.particles[index].unbind())
    }

    /// Swap the anchor of one end.
    pub fn set_anchor(&mut self, endpoint: Endpoint, anchor: AnchorRef<F>) {
        let index = self.endpoint_index(endpoint);
        self.particles[index].bind(anchor);
    }

    pub fn anchor(&self, endpoint: Endpoint) -> Option<&AnchorRef<F>> {
        self.particles[self.endpoint_index(endpoint)].anchor()
    }

    /// Feed the latest external pose. Takes effect on the next integration.
    pub fn update_anchor_pose(&mut self, endpoint: Endpoint, pose: Vec3<F>) {
        let index = self.endpoint_index(endpoint);
        if let Some(anchor) = self.particles[index].anchor_mut() {
            anchor.set_pose(pose);
        }
    }

    /// Feed the latest external body velocity (rigid-body anchors only).
    pub fn update_anchor_velocity(&mut self, endpoint: Endpoint, velocity: Vec3<F>) {
        let index = self.endpoint_index(endpoint);
        if let Some(anchor) = self.particles[index].anchor_mut() {
            anchor.set_linear_velocity(velocity);
        }
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle<F>] {
        &mut self.particles
    }

    pub fn particle(&self, index: usize) -> &Particle<F> {
        &self.particles[index]
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Write current positions into `out`, reusing its allocation.
    pub fn positions_into(&self, out: &mut AllocVec<Vec3<F>>) {
        out.clear();
        out.extend(self.particles.iter().map(|p| p.position));
    }

    /// Sum of the current segment lengths.
    pub fn current_length(&self) -> F {
        self.particles
            .windows(2)
            .fold(F::zero(), |acc, pair| acc + pair[0].position.distance(pair[1].position))
    }
}
