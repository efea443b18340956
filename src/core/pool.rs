//! The shared request pool: FIFO with a single reordering primitive.

use std::collections::VecDeque;

use crate::core::request::Request;

/// Ordered queue of pending transfer requests.
///
/// Plain FIFO with one exception: [`RequestPool::defer_head`] rotates an
/// infeasible head to the tail so satisfiable requests behind it can proceed.
/// The pool itself is not synchronized; callers hold the board lock for
/// every operation.
#[derive(Debug, Default)]
pub struct RequestPool {
    requests: VecDeque<Request>,
}

impl RequestPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests: VecDeque::new(),
        }
    }

    /// Append a request to the tail.
    pub fn enqueue(&mut self, request: Request) {
        self.requests.push_back(request);
    }

    /// The request at the head, without removing it.
    #[must_use]
    pub fn peek_head(&self) -> Option<&Request> {
        self.requests.front()
    }

    /// Remove and return the head request.
    pub fn remove_head(&mut self) -> Option<Request> {
        self.requests.pop_front()
    }

    /// Move the head to the tail, preserving the order of everything else.
    ///
    /// Returns `false` without touching the pool when it holds at most one
    /// element: a sole request cannot be deferred behind anything, and the
    /// caller must fall back to its retry path instead.
    pub fn defer_head(&mut self) -> bool {
        if self.requests.len() < 2 {
            return false;
        }
        if let Some(head) = self.requests.pop_front() {
            self.requests.push_back(head);
        }
        true
    }

    /// Remove every remaining request, in order.
    ///
    /// Used only when the remaining requests are provably unsatisfiable and
    /// get reported as starved.
    pub fn drain(&mut self) -> Vec<Request> {
        self.requests.drain(..).collect()
    }

    /// Number of pending requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the pool holds no requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn request(passengers: u32) -> Request {
        Request::new(0, 1, passengers, Duration::from_millis(1))
    }

    #[test]
    fn test_fifo_order() {
        let mut pool = RequestPool::new();
        pool.enqueue(request(1));
        pool.enqueue(request(2));
        pool.enqueue(request(3));

        assert_eq!(pool.remove_head().unwrap().passengers, 1);
        assert_eq!(pool.remove_head().unwrap().passengers, 2);
        assert_eq!(pool.remove_head().unwrap().passengers, 3);
        assert!(pool.remove_head().is_none());
    }

    #[test]
    fn test_defer_rotates_head_to_tail() {
        let mut pool = RequestPool::new();
        pool.enqueue(request(1));
        pool.enqueue(request(2));
        pool.enqueue(request(3));

        assert!(pool.defer_head());

        // Size and contents unchanged, only the order moved.
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.remove_head().unwrap().passengers, 2);
        assert_eq!(pool.remove_head().unwrap().passengers, 3);
        assert_eq!(pool.remove_head().unwrap().passengers, 1);
    }

    #[test]
    fn test_defer_preserves_relative_order_of_rest() {
        let mut pool = RequestPool::new();
        for p in 1..=5 {
            pool.enqueue(request(p));
        }
        pool.defer_head();
        pool.defer_head();

        let order: Vec<u32> = pool.drain().iter().map(|r| r.passengers).collect();
        assert_eq!(order, vec![3, 4, 5, 1, 2]);
    }

    #[test]
    fn test_defer_is_noop_on_sole_element() {
        let mut pool = RequestPool::new();
        pool.enqueue(request(9));

        assert!(!pool.defer_head());
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.peek_head().unwrap().passengers, 9);
    }

    #[test]
    fn test_defer_is_noop_on_empty_pool() {
        let mut pool = RequestPool::new();
        assert!(!pool.defer_head());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_drain_empties_in_order() {
        let mut pool = RequestPool::new();
        pool.enqueue(request(4));
        pool.enqueue(request(5));

        let drained = pool.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].passengers, 4);
        assert_eq!(drained[1].passengers, 5);
        assert!(pool.is_empty());
    }
}
