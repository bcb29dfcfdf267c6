// greencore is a pipeline worker for copy/delete/share operations over a
// project's hierarchical object store.
// Copyright (C) 2026  greencore contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

use crate::models::node::Node;

/// An ordered collection of nodes, mirroring the Python `NodeList(list)`
/// wrapper: plain `Vec` semantics plus a couple of domain-specific helpers.
#[derive(Debug, Clone, Default)]
pub struct NodeList(pub Vec<Node>);

impl NodeList {
    pub fn new(nodes: Vec<Node>) -> Self {
        NodeList(nodes)
    }

    pub fn ids(&self) -> HashSet<String> {
        self.0.iter().map(|n| n.id.clone()).collect()
    }

    pub fn filter_files(&self) -> NodeList {
        NodeList(self.0.iter().filter(|n| n.is_file()).cloned().collect())
    }
}

impl Deref for NodeList {
    type Target = Vec<Node>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for NodeList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl IntoIterator for NodeList {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Node> for NodeList {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        NodeList(iter.into_iter().collect())
    }
}
