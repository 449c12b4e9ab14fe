use std::iter::Map;

/// Containers that can be walked position by position in row-major order.
pub trait Indexable {
    type T;
    type Idx: Copy;

    fn first_idx(&self) -> Option<Self::Idx>;
    fn next_idx(&self, idx: &Self::Idx) -> Option<Self::Idx>;

    /// Element at an index produced by `first_idx`/`next_idx`.
    fn elem(&self, idx: &Self::Idx) -> &Self::T;
}

pub struct Iter<'a, Tn>
where
    Tn: Indexable,
{
    t: &'a Tn,
    cur: Option<Tn::Idx>,
}

impl<'a, Tn> Iter<'a, Tn>
where
    Tn: Indexable,
{
    pub fn new(t: &'a Tn) -> Self {
        Self {
            t,
            cur: t.first_idx(),
        }
    }

    pub fn values(self) -> Map<Iter<'a, Tn>, impl FnMut((Tn::Idx, &'a Tn::T)) -> &'a Tn::T> {
        self.map(|(_, v)| v)
    }
}

impl<'a, Tn> Iterator for Iter<'a, Tn>
where
    Tn: Indexable,
{
    type Item = (Tn::Idx, &'a Tn::T);

    fn next(&mut self) -> Option<Self::Item> {
        match &self.cur {
            None => None,
            Some(idx) => {
                let cur_idx = *idx;
                let item = (cur_idx, self.t.elem(&cur_idx));
                self.cur = self.t.next_idx(&cur_idx);

                Some(item)
            }
        }
    }
}
