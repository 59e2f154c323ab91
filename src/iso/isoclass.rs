//! Isomorphism-class catalogue for 3- and 4-vertex simple graphs.
//!
//! Every simple graph on `size` vertices is an adjacency bitmask over the
//! vertex pairs; the canonical form of a mask is the numeric minimum over
//! all vertex relabelings. Classes are numbered in ascending order of their
//! canonical mask, which is stable across runs and platforms. The class
//! index addresses the canonical representative graph.
//!
//! Sizes beyond 4 are rejected up front: the overlap-type enumeration this
//! catalogue feeds is hand-specialized per size.

use crate::model::Graph;
use crate::{Error, Result};

/// Number of isomorphism classes of simple graphs on `size` vertices.
pub fn class_count(size: usize, directed: bool) -> Result<usize> {
    Ok(representatives(size, directed)?.len())
}

/// Canonical representative graph of class `class_id`.
pub fn create(size: usize, class_id: usize, directed: bool) -> Result<Graph> {
    let reps = representatives(size, directed)?;
    let Some(&mask) = reps.get(class_id) else {
        return Err(Error::Input(format!(
            "isomorphism class {class_id} out of range: {} classes of {} {}-vertex graphs",
            reps.len(),
            if directed { "directed" } else { "undirected" },
            size,
        )));
    };

    let pairs = vertex_pairs(size, directed);
    let mut graph = Graph::empty(size, directed);
    for (bit, &(a, b)) in pairs.iter().enumerate() {
        if mask & (1u32 << bit) != 0 {
            graph.add_edge(a, b);
        }
    }
    Ok(graph)
}

/// Canonical masks of all classes, ascending.
fn representatives(size: usize, directed: bool) -> Result<Vec<u32>> {
    if !(3..=4).contains(&size) {
        return Err(Error::Input(format!(
            "pattern size must be 3 or 4 vertices, got {size}"
        )));
    }

    let pairs = vertex_pairs(size, directed);
    let perms = permutations(size);

    // pair -> bit index, for relabeling
    let mut bit_of = [[usize::MAX; 4]; 4];
    for (bit, &(a, b)) in pairs.iter().enumerate() {
        bit_of[a as usize][b as usize] = bit;
        if !directed {
            bit_of[b as usize][a as usize] = bit;
        }
    }

    let mut reps = Vec::new();
    for mask in 0u32..1 << pairs.len() {
        let canon = perms
            .iter()
            .map(|perm| relabel(mask, &pairs, &bit_of, perm))
            .min()
            .unwrap_or(mask);
        // A mask equal to its own canonical form is each class's first and
        // smallest appearance, so `reps` stays sorted and duplicate-free.
        if canon == mask {
            reps.push(mask);
        }
    }
    Ok(reps)
}

fn relabel(mask: u32, pairs: &[(u32, u32)], bit_of: &[[usize; 4]; 4], perm: &[usize]) -> u32 {
    let mut out = 0u32;
    for (bit, &(a, b)) in pairs.iter().enumerate() {
        if mask & (1u32 << bit) != 0 {
            out |= 1u32 << bit_of[perm[a as usize]][perm[b as usize]];
        }
    }
    out
}

/// Vertex pairs in bit order: ordered pairs for digraphs, `i < j` otherwise.
fn vertex_pairs(size: usize, directed: bool) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for i in 0..size as u32 {
        for j in 0..size as u32 {
            if i == j || (!directed && i > j) {
                continue;
            }
            pairs.push((i, j));
        }
    }
    pairs
}

/// All vertex relabelings of `0..size`, lexicographic.
fn permutations(size: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(size);
    let mut used = vec![false; size];
    permute_into(size, &mut current, &mut used, &mut out);
    out
}

fn permute_into(
    size: usize,
    current: &mut Vec<usize>,
    used: &mut [bool],
    out: &mut Vec<Vec<usize>>,
) {
    if current.len() == size {
        out.push(current.clone());
        return;
    }
    for v in 0..size {
        if !used[v] {
            used[v] = true;
            current.push(v);
            permute_into(size, current, used, out);
            current.pop();
            used[v] = false;
        }
    }
}
