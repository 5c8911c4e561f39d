//! Search tree nodes and path reconstruction.
//!
//! Nodes form an implicit tree through `Rc` parent links. Several children share
//! one parent, and the parent stays alive for as long as any frontier entry, visited
//! path or returned terminal node still points at it.

use crate::engine::{Action, Board};
use std::rc::Rc;

/// One letter per move separated by spaces, e.g. `"U L D"`. Empty for no moves.
pub fn format_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|a| a.letter().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// An immutable snapshot of one step in a search.
///
/// `cost` is strategy specific: uninformed searches leave it at 0, informed
/// searches store the heuristic estimate of `state`. `depth` is always the number of
/// moves from the root.
#[derive(Debug)]
pub struct SearchNode {
    state: Board,
    parent: Option<Rc<SearchNode>>,
    action: Option<Action>,
    cost: u32,
    depth: u32,
}

impl SearchNode {
    /// Creates the root of a search tree.
    pub fn root(state: Board, cost: u32) -> Rc<Self> {
        Rc::new(SearchNode {
            state,
            parent: None,
            action: None,
            cost,
            depth: 0,
        })
    }

    /// Creates a child one move below `parent`.
    pub fn child(parent: &Rc<SearchNode>, action: Action, state: Board, cost: u32) -> Rc<Self> {
        Rc::new(SearchNode {
            state,
            parent: Some(Rc::clone(parent)),
            action: Some(action),
            cost,
            depth: parent.depth + 1,
        })
    }

    pub fn state(&self) -> &Board {
        &self.state
    }

    pub fn parent(&self) -> Option<&Rc<SearchNode>> {
        self.parent.as_ref()
    }

    /// The move that produced this node. `None` only for the root.
    pub fn action(&self) -> Option<Action> {
        self.action
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Every `(action, state)` pair from the root down to this node.
    ///
    /// The first entry is the root with no action. The list is `depth + 1` long.
    pub fn path(&self) -> Vec<(Option<Action>, Board)> {
        let mut steps = vec![(self.action, self.state)];
        let mut current = self.parent.as_deref();
        while let Some(node) = current {
            steps.push((node.action, node.state));
            current = node.parent.as_deref();
        }
        steps.reverse();
        steps
    }

    /// The actions leading from the root to this node, `depth` entries long.
    pub fn actions(&self) -> Vec<Action> {
        self.path()
            .into_iter()
            .filter_map(|(action, _)| action)
            .collect()
    }

    /// Compact summary of the path, one letter per move separated by spaces.
    ///
    /// ```
    /// use eight_puzzle_solver::engine::{Action, Board};
    /// use eight_puzzle_solver::node::SearchNode;
    ///
    /// let start = Board::from_rows([[1, 2, 3], [4, 5, 6], [0, 7, 8]]).unwrap();
    /// let root = SearchNode::root(start, 0);
    /// let mid = SearchNode::child(&root, Action::Right, start.apply(Action::Right).unwrap(), 0);
    /// let end_state = mid.state().apply(Action::Right).unwrap();
    /// let end = SearchNode::child(&mid, Action::Right, end_state, 0);
    ///
    /// assert_eq!(end.action_string(), "R R");
    /// assert_eq!(root.action_string(), "");
    /// ```
    pub fn action_string(&self) -> String {
        format_actions(&self.actions())
    }
}

// Long parent chains are released iteratively so a deep DFS result cannot overflow the
// stack through recursive drops.
impl Drop for SearchNode {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut inner) => next = inner.parent.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(start: Board, actions: &[Action]) -> Rc<SearchNode> {
        let mut node = SearchNode::root(start, 0);
        for &action in actions {
            let next = node.state().apply(action).unwrap();
            node = SearchNode::child(&node, action, next, 0);
        }
        node
    }

    #[test]
    fn test_root_node() {
        let root = SearchNode::root(Board::goal(), 7);
        assert!(root.is_root());
        assert_eq!(root.action(), None);
        assert_eq!(root.depth(), 0);
        assert_eq!(root.cost(), 7);
        assert!(root.actions().is_empty());
        assert_eq!(root.path(), vec![(None, Board::goal())]);
    }

    #[test]
    fn test_child_depth_and_parent() {
        let root = SearchNode::root(Board::goal(), 0);
        let up = Board::goal().apply(Action::Up).unwrap();
        let child = SearchNode::child(&root, Action::Up, up, 3);
        assert_eq!(child.depth(), 1);
        assert_eq!(child.cost(), 3);
        assert_eq!(child.parent().unwrap().state(), &Board::goal());
        assert_eq!(Rc::strong_count(&root), 2);
    }

    #[test]
    fn test_path_reconstruction_order() {
        let moves = [Action::Up, Action::Left, Action::Down, Action::Right];
        let end = chain(Board::goal(), &moves);
        assert_eq!(end.depth(), 4);
        assert_eq!(end.actions(), moves.to_vec());
        assert_eq!(end.action_string(), "U L D R");

        let path = end.path();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], (None, Board::goal()));
        assert_eq!(path[4].1, *end.state());
        for window in path.windows(2) {
            let (action, _) = window[1];
            assert_eq!(window[0].1.apply(action.unwrap()), Some(window[1].1));
        }
    }

    #[test]
    fn test_deep_chain_drops_without_overflow() {
        let mut node = SearchNode::root(Board::goal(), 0);
        for i in 0..200_000 {
            let action = if i % 2 == 0 { Action::Up } else { Action::Down };
            let next = node.state().apply(action).unwrap();
            node = SearchNode::child(&node, action, next, 0);
        }
        assert_eq!(node.depth(), 200_000);
        drop(node);
    }
}
