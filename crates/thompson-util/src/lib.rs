// typed indices into arena-style vectors, so graphs with cycles can be
// expressed without reference counting
#[macro_export]
macro_rules! make_idx_type {
    ($vis:vis $idx_name:ident, $elem_name:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $idx_name(u32);

        impl $idx_name {
            /// Pushes `val` onto the arena and returns the index it landed at.
            $vis fn from_push(arena: &mut Vec<$elem_name>, val: $elem_name) -> $idx_name {
                let idx = $idx_name(arena.len() as u32);
                arena.push(val);
                idx
            }

            $vis fn from_index(index: usize) -> $idx_name {
                $idx_name(index as u32)
            }

            $vis fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::ops::Index<$idx_name> for [$elem_name] {
            type Output = $elem_name;

            fn index(&self, index: $idx_name) -> &Self::Output {
                &self[index.0 as usize]
            }
        }

        impl std::ops::IndexMut<$idx_name> for [$elem_name] {
            fn index_mut(&mut self, index: $idx_name) -> &mut Self::Output {
                &mut self[index.0 as usize]
            }
        }

        impl std::ops::Index<$idx_name> for Vec<$elem_name> {
            type Output = $elem_name;

            fn index(&self, index: $idx_name) -> &Self::Output {
                &self.as_slice()[index]
            }
        }

        impl std::ops::IndexMut<$idx_name> for Vec<$elem_name> {
            fn index_mut(&mut self, index: $idx_name) -> &mut Self::Output {
                &mut self.as_mut_slice()[index]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #[derive(Debug, PartialEq)]
    struct Node(char);

    make_idx_type!(NodeId, Node);

    #[test]
    fn push_then_index() {
        let mut arena: Vec<Node> = Vec::new();
        let a = NodeId::from_push(&mut arena, Node('a'));
        let b = NodeId::from_push(&mut arena, Node('b'));

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena[b], Node('b'));

        arena[a].0 = 'z';
        assert_eq!(arena.as_slice()[a], Node('z'));
        assert_eq!(NodeId::from_index(1), b);
        assert!(a < b);
    }
}
