// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

/// Result of one ray/scene intersection query.
///
/// `u`/`v` are barycentric coordinates: the hit point is
/// `(1 - u - v) * p0 + u * p1 + v * p2` for a triangle.
/// `primitive_list_index` and `primitive_list_index_inst` are only meaningful
/// for hits against an acceleration structure of instances: the first
/// selects the instance, the second the primitive inside it.
///
/// When `hit` is unset every other field may hold garbage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HitRecord {
    pub hit: bool,
    pub t: Float,
    pub prim_id: u32,
    pub geom_id: u32,
    pub u: Float,
    pub v: Float,
    pub isect_pos: Vector3f,
    pub primitive_list_index: u32,
    pub primitive_list_index_inst: u32,
}

impl HitRecord {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn barycentric(&self) -> (Float, Float, Float) {
        (1.0 - self.u - self.v, self.u, self.v)
    }
}

/// `N` hit records stored lane-major so each field loads as one vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRecordPacket<const N: usize> {
    pub hit: [bool; N],
    pub t: [Float; N],
    pub prim_id: [u32; N],
    pub geom_id: [u32; N],
    pub u: [Float; N],
    pub v: [Float; N],
    pub isect_pos: [[Float; N]; 3],
    pub primitive_list_index: [u32; N],
    pub primitive_list_index_inst: [u32; N],
}

pub type HitRecordPacket4 = HitRecordPacket<4>;
pub type HitRecordPacket8 = HitRecordPacket<8>;

impl<const N: usize> Default for HitRecordPacket<N> {
    fn default() -> Self {
        Self {
            hit: [false; N],
            t: [0.0; N],
            prim_id: [0; N],
            geom_id: [0; N],
            u: [0.0; N],
            v: [0.0; N],
            isect_pos: [[0.0; N]; 3],
            primitive_list_index: [0; N],
            primitive_list_index_inst: [0; N],
        }
    }
}

impl<const N: usize> HitRecordPacket<N> {
    const MASK_FITS: () = assert!(N <= 64, "hit_mask supports at most 64 lanes");

    pub fn lane(&self, i: usize) -> HitRecord {
        HitRecord {
            hit: self.hit[i],
            t: self.t[i],
            prim_id: self.prim_id[i],
            geom_id: self.geom_id[i],
            u: self.u[i],
            v: self.v[i],
            isect_pos: Vector3f::new(self.isect_pos[0][i], self.isect_pos[1][i], self.isect_pos[2][i]),
            primitive_list_index: self.primitive_list_index[i],
            primitive_list_index_inst: self.primitive_list_index_inst[i],
        }
    }

    /// Split into `N` independent scalar records, each with its own hit flag.
    pub fn unpack(&self) -> [HitRecord; N] {
        std::array::from_fn(|i| self.lane(i))
    }

    /// Inverse of `unpack`. Lanes without a hit are masked to the default
    /// record.
    pub fn pack(records: &[HitRecord; N]) -> Self {
        let mut packet = Self::default();
        for (i, record) in records.iter().enumerate() {
            if record.hit {
                packet.set_lane(i, record);
            }
        }
        packet
    }

    pub fn set_lane(&mut self, i: usize, record: &HitRecord) {
        self.hit[i] = record.hit;
        self.t[i] = record.t;
        self.prim_id[i] = record.prim_id;
        self.geom_id[i] = record.geom_id;
        self.u[i] = record.u;
        self.v[i] = record.v;
        for axis in 0..3 {
            self.isect_pos[axis][i] = record.isect_pos[axis];
        }
        self.primitive_list_index[i] = record.primitive_list_index;
        self.primitive_list_index_inst[i] = record.primitive_list_index_inst;
    }

    /// Active lanes as a bit mask, lane 0 in the lowest bit. Packets wider
    /// than 64 lanes are rejected at compile time.
    pub fn hit_mask(&self) -> u64 {
        let () = Self::MASK_FITS;
        self.hit
            .iter()
            .enumerate()
            .fold(0u64, |mask, (i, hit)| if *hit { mask | (1u64 << i) } else { mask })
    }

    pub fn hit_count(&self) -> usize {
        self.hit.iter().filter(|h| **h).count()
    }

    pub fn any(&self) -> bool {
        self.hit.iter().any(|h| *h)
    }
}
