// Copyright @yucwang 2021

use crate::core::bvh::IndexBvh;
use crate::core::get_surface::{get_surface, ResolveSurface};
use crate::core::hit_record::HitRecordPacket;
use crate::core::shape::Shape;
use crate::core::surface::SurfacePacket;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::Spectrum;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

/// Resolved colors of an orthographic probe, top row first.
pub struct ProbeImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Spectrum>,
    pub hits: usize,
}

impl ProbeImage {
    /// Average color over the pixels that hit something.
    pub fn mean_hit_color(&self, hit_mask: &[bool]) -> Spectrum {
        if self.hits == 0 {
            return Spectrum::default();
        }
        let mut sum = Spectrum::default();
        for (color, hit) in self.pixels.iter().zip(hit_mask.iter()) {
            if *hit {
                sum += *color;
            }
        }
        sum * (1.0 / self.hits as Float)
    }
}

/// Shoots a grid of rays straight down -z over a BVH's bounds and resolves
/// every hit in packets of `N` lanes.
pub struct SurfaceProbe<'a, P> {
    bvh: &'a IndexBvh<P>,
    bounds: AABB,
    width: usize,
    height: usize,
}

impl<'a, P: Shape> SurfaceProbe<'a, P> {
    pub fn new(bvh: &'a IndexBvh<P>, rows: usize) -> Self {
        let bounds = bvh.bounds();
        let height = rows.max(1);
        let extent = bounds.diagnal();
        let width = if bounds.is_valid() && extent.y > 0.0 {
            ((height as Float * extent.x / extent.y).round() as usize).max(1)
        } else {
            height
        };
        Self { bvh, bounds, width, height }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Ray through the center of pixel `(x, y)`; row 0 is the top (+y) edge.
    pub fn pixel_ray(&self, x: usize, y: usize) -> Ray3f {
        let extent = self.bounds.diagnal();
        let px = self.bounds.p_min.x + (x as Float + 0.5) / self.width as Float * extent.x;
        let py = self.bounds.p_max.y - (y as Float + 0.5) / self.height as Float * extent.y;
        let origin = Vector3f::new(px, py, self.bounds.p_max.z + 1.0);
        Ray3f::new(origin, Vector3f::new(0.0, 0.0, -1.0), None, None)
    }

    /// Resolve the whole grid. Rows are handed out to worker threads one at
    /// a time; each row is traced and resolved `N` pixels at a time.
    pub fn render<const N: usize, Params, M>(&self, params: &Params) -> (ProbeImage, Vec<bool>)
    where
        Params: Sync,
        M: Clone,
        HitRecordPacket<N>: ResolveSurface<Params, Output = SurfacePacket<M, N>>,
    {
        let (width, height) = (self.width, self.height);
        let mut pixels = vec![Spectrum::default(); width * height];
        let mut hit_mask = vec![false; width * height];
        if !self.bounds.is_valid() {
            return (ProbeImage { width, height, pixels, hits: 0 }, hit_mask);
        }

        let next_row = Arc::new(AtomicUsize::new(0));
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(height);
        let (tx, rx) = mpsc::channel::<(usize, Vec<Spectrum>, Vec<bool>)>();

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_row = Arc::clone(&next_row);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let y = next_row.fetch_add(1, Ordering::Relaxed);
                        if y >= height {
                            break;
                        }
                        let (colors, hits) = self.resolve_row::<N, Params, M>(params, y);
                        if tx.send((y, colors, hits)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for _ in 0..height {
                if let Ok((y, colors, hits)) = rx.recv() {
                    pixels[y * width..(y + 1) * width].copy_from_slice(&colors);
                    hit_mask[y * width..(y + 1) * width].copy_from_slice(&hits);
                }
            }
        });

        let hits = hit_mask.iter().filter(|h| **h).count();
        (ProbeImage { width, height, pixels, hits }, hit_mask)
    }

    fn resolve_row<const N: usize, Params, M>(&self, params: &Params, y: usize) -> (Vec<Spectrum>, Vec<bool>)
    where
        M: Clone,
        HitRecordPacket<N>: ResolveSurface<Params, Output = SurfacePacket<M, N>>,
    {
        let mut colors = vec![Spectrum::default(); self.width];
        let mut hits = vec![false; self.width];
        // Lanes past the end of the row get an empty segment and never hit.
        let idle = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), Some(1.0), Some(0.0));

        for x0 in (0..self.width).step_by(N) {
            let rays: [Ray3f; N] = std::array::from_fn(|i| {
                if x0 + i < self.width { self.pixel_ray(x0 + i, y) } else { idle }
            });
            let packet = self.bvh.ray_intersection_packet(&rays);
            let surfaces = get_surface(&packet, params);
            log::debug!("Row {} lanes {}..{}: {} of {} hit.", y, x0, x0 + N, packet.hit_count(), N);

            for i in 0..N.min(self.width - x0) {
                colors[x0 + i] = surfaces.lane(i).color;
                hits[x0 + i] = packet.hit[i];
            }
        }
        (colors, hits)
    }
}
