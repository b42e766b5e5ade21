//! Selection networks
//!
//! [`argmax_4_2`] picks the two largest of four values together with their
//! indices using a fixed comparator network: two pre-sorting comparators on
//! the input pairs followed by three comparisons that resolve the top two.
//! The network has no data-dependent loops, which keeps its latency constant.

/// The two largest values of a selection and where they came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Top2<T, I> {
    /// Largest value
    pub first: T,
    /// Second largest value
    pub second: T,
    /// Index carried with `first`
    pub first_index: I,
    /// Index carried with `second`
    pub second_index: I,
}

impl<T, I> Top2<T, I> {
    fn new((first, first_index): (T, I), (second, second_index): (T, I)) -> Self {
        Self {
            first,
            second,
            first_index,
            second_index,
        }
    }
}

/// Select the two largest of four values, carrying their indices along
///
/// With `sorted = true` the caller promises that each input pair is already
/// ordered (`values[0] >= values[1]` and `values[2] >= values[3]`) and the two
/// pre-sorting comparators are skipped.
///
/// Ties inside a pair are broken towards the second element of the pair
/// when pre-sorting; across pairs the first pair wins.
///
/// # Panics
///
/// Panics if `sorted` is `true` and either pair is out of order.
///
/// # Examples
///
/// ```
/// use fixmat_kernels::argmax_4_2;
///
/// let top = argmax_4_2([3, 9, 1, 7], [10u8, 11, 12, 13], false);
/// assert_eq!((top.first, top.first_index), (9, 11));
/// assert_eq!((top.second, top.second_index), (7, 13));
/// ```
pub fn argmax_4_2<T, I>(values: [T; 4], indices: [I; 4], sorted: bool) -> Top2<T, I>
where
    T: PartialOrd + Copy,
    I: Copy,
{
    let [v0, v1, v2, v3] = values;
    let [i0, i1, i2, i3] = indices;
    let (hi_a, lo_a, hi_b, lo_b) = if sorted {
        assert!(
            v0 >= v1 && v2 >= v3,
            "argmax_4_2 with sorted = true needs values[0] >= values[1] and values[2] >= values[3]"
        );
        ((v0, i0), (v1, i1), (v2, i2), (v3, i3))
    } else {
        let (hi_a, lo_a) = order_pair((v0, i0), (v1, i1));
        let (hi_b, lo_b) = order_pair((v2, i2), (v3, i3));
        (hi_a, lo_a, hi_b, lo_b)
    };

    if hi_a.0 < lo_b.0 {
        Top2::new(hi_b, lo_b)
    } else if hi_b.0 < lo_a.0 {
        Top2::new(hi_a, lo_a)
    } else if hi_a.0 < hi_b.0 {
        Top2::new(hi_b, hi_a)
    } else {
        Top2::new(hi_a, hi_b)
    }
}

/// Comparator: larger of the pair first, the second input on ties
#[inline]
fn order_pair<T: PartialOrd + Copy, I: Copy>(a: (T, I), b: (T, I)) -> ((T, I), (T, I)) {
    if a.0 > b.0 {
        (a, b)
    } else {
        (b, a)
    }
}
