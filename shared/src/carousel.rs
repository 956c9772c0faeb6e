/// 轮播位置
///
/// 任何时刻 `index < len`（列表为空时为 0）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rotation {
    index: usize,
    len: usize,
}

impl Rotation {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 前进一格，到末尾回到开头
    pub fn advance(&mut self) {
        self.index = if self.len == 0 {
            0
        } else {
            (self.index + 1) % self.len
        };
    }

    /// 列表长度变化；返回长度是否真的变了（需要重置定时器）
    pub fn set_len(&mut self, len: usize) -> bool {
        let changed = self.len != len;
        self.len = len;
        if self.index >= len {
            self.index = 0;
        }
        changed
    }

    /// 当前应展示的元素
    pub fn current<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_around() {
        let mut r = Rotation::new(3);
        let seen: Vec<usize> = (0..5)
            .map(|_| {
                r.advance();
                r.index()
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 0, 1, 2]);
    }

    #[test]
    fn empty_list_stays_at_zero() {
        let mut r = Rotation::new(0);
        r.advance();
        assert_eq!(r.index(), 0);
        assert_eq!(r.current::<u8>(&[]), None);
    }

    #[test]
    fn shrinking_keeps_index_in_range() {
        let mut r = Rotation::new(5);
        for _ in 0..4 {
            r.advance();
        }
        assert_eq!(r.index(), 4);

        assert!(r.set_len(2));
        assert!(r.index() < r.len());
        assert!(!r.set_len(2));

        r.set_len(0);
        assert_eq!(r.index(), 0);
        assert!(r.is_empty());
    }

    #[test]
    fn index_is_always_in_bounds() {
        let mut r = Rotation::default();
        for step in 0..200usize {
            if step % 7 == 0 {
                r.set_len((step * 31) % 6);
            }
            r.advance();
            assert!((r.is_empty() && r.index() == 0) || r.index() < r.len());
        }
    }
}
