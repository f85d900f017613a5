use std::cmp::Ordering;

/// Binary min-heap ordered by a caller-supplied comparator instead of `Ord`.
pub struct MinHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    elements: Vec<T>,
    compare: F,
}

impl<T, F> MinHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(compare: F) -> Self {
        MinHeap {
            elements: Vec::new(),
            compare,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.elements[a], &self.elements[b]) == Ordering::Less
    }

    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let mut i = self.elements.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.elements.swap(i, parent);
            i = parent;
        }
    }

    pub fn extract_min(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let result = self.elements.pop();
        self.sift_down(0);
        result
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let l = 2 * i + 1;
            let r = l + 1;
            let mut smallest = i;
            if l < n && self.less(l, smallest) {
                smallest = l;
            }
            if r < n && self.less(r, smallest) {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }
}
