use crate::{
    binaries::BinaryCursor,
    error::{ParseError, ParseResult},
};

use super::{
    consts::{LumpType, MAX_MAP_VISIBILITY},
    lump::BSPLump,
};

/// Cluster to cluster potentially visible set.
///
/// `bits` holds one row of `bytes_per_cluster` bytes per cluster. Bit `to`
/// of row `from` is set when anything in cluster `to` may be seen from
/// somewhere in cluster `from`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisData {
    pub cluster_count: i32,
    pub bytes_per_cluster: i32,
    pub bits: Vec<u8>,
}

impl VisData {
    /// Decodes the visibility section, `None` when the section is empty.
    pub fn read(data: &[u8], lump: &BSPLump) -> ParseResult<Option<Self>> {
        if lump.is_empty() {
            return Ok(None);
        }

        let bytes = lump.read_bytes(data)?;
        let mut cursor = BinaryCursor::new(bytes);
        let cluster_count = cursor.read_i32()?;
        let bytes_per_cluster = cursor.read_i32()?;

        if cluster_count < 0 || bytes_per_cluster < 0 {
            return Err(ParseError::malformed(
                LumpType::VisData,
                format!("negative dimensions {cluster_count} x {bytes_per_cluster}"),
            ));
        }

        let wanted = cluster_count as usize * bytes_per_cluster as usize;
        if wanted > cursor.remaining() {
            return Err(ParseError::malformed(
                LumpType::VisData,
                format!(
                    "{cluster_count} clusters of {bytes_per_cluster} bytes do not fit in {} bytes",
                    cursor.remaining()
                ),
            ));
        }

        if wanted > MAX_MAP_VISIBILITY {
            log::warn!("visibility data is {wanted} bytes, over the engine limit of {MAX_MAP_VISIBILITY}");
        }

        Ok(Some(Self {
            cluster_count,
            bytes_per_cluster,
            bits: cursor.read_bytes(wanted)?.to_vec(),
        }))
    }

    /// Whether cluster `to` is potentially visible from cluster `from`.
    ///
    /// Negative clusters are always visible. Lookups outside the bit table
    /// are not: `from` must name an encoded row and `to` must fall inside
    /// that row's bytes, so a lookup never spills into the next row.
    pub fn is_visible(&self, from: i32, to: i32) -> bool {
        if from < 0 || to < 0 {
            return true;
        }
        if from >= self.cluster_count || (to >> 3) >= self.bytes_per_cluster {
            return false;
        }

        let byte = from as i64 * self.bytes_per_cluster as i64 + (to >> 3) as i64;
        usize::try_from(byte)
            .ok()
            .and_then(|i| self.bits.get(i))
            .map_or(false, |b| b & (1 << (to & 7)) != 0)
    }

    /// Clusters visible from `from`, in ascending order.
    pub fn visible_clusters(&self, from: i32) -> impl Iterator<Item = i32> + '_ {
        (0..self.cluster_count).filter(move |&to| self.is_visible(from, to))
    }
}

#[cfg(test)]
mod visdata_tests {
    use super::*;

    fn two_clusters() -> VisData {
        VisData {
            cluster_count: 2,
            bytes_per_cluster: 1,
            bits: vec![0b11, 0b11],
        }
    }

    #[test]
    fn bit_lookup() {
        let vis = two_clusters();
        assert!(vis.is_visible(0, 1));
        assert!(vis.is_visible(1, 0));

        let vis = VisData {
            bits: vec![0b01, 0b10],
            ..two_clusters()
        };
        assert!(vis.is_visible(0, 0));
        assert!(!vis.is_visible(0, 1));
        assert!(!vis.is_visible(1, 0));
        assert_eq!(vis.visible_clusters(1).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn out_of_range_is_hidden() {
        let vis = two_clusters();
        assert!(!vis.is_visible(2, 0));
        assert!(!vis.is_visible(0, 8));
        assert!(!vis.is_visible(i32::MAX, i32::MAX));
    }

    #[test]
    fn lookup_never_reads_the_next_row() {
        // bit 0 of row 1 is set, but cluster 8 is past row 0's single byte
        let vis = VisData {
            bits: vec![0b00, 0b01],
            ..two_clusters()
        };
        assert!(!vis.is_visible(0, 8));
        assert!(!vis.is_visible(0, 9));
        assert!(vis.is_visible(1, 0));
    }

    #[test]
    fn single_row_reference_bits() {
        let vis = VisData {
            cluster_count: 1,
            bytes_per_cluster: 1,
            bits: vec![0b0000_0011],
        };
        assert!(vis.is_visible(0, 0));
        assert!(vis.is_visible(0, 1));
        assert!(!vis.is_visible(0, 2));
        assert!(!vis.is_visible(1, 0));
    }

    #[test]
    fn negative_clusters_are_visible() {
        let vis = VisData::default();
        assert!(vis.is_visible(-1, 5));
        assert!(vis.is_visible(3, -1));
    }

    #[test]
    fn section_must_hold_declared_rows() {
        let mut data = Vec::new();
        data.extend_from_slice(&4i32.to_le_bytes());
        data.extend_from_slice(&2i32.to_le_bytes());
        data.extend_from_slice(&[0xff; 7]);
        let lump = BSPLump {
            offset: 0,
            length: data.len() as u32,
        };

        assert!(matches!(
            VisData::read(&data, &lump),
            Err(ParseError::MalformedSection {
                lump: LumpType::VisData,
                ..
            })
        ));
    }

    #[test]
    fn empty_section_is_none() {
        assert_eq!(VisData::read(&[], &BSPLump::default()), Ok(None));
    }
}
