#![no_main]
use std::collections::VecDeque;

use arbitrary::Arbitrary;
use chunk_deque::Deque;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    At(usize),
    Back,
    BackMut(i32),
    Clone,
    Equals,
    Extend(Vec<i32>),
    Fill(u16, i32),
    Front,
    FrontMut(i32),
    Get(usize),
    IndexMut(usize, i32),
    IsEmpty,
    Len,
    PopBack,
    PushBack(i32),
    PushFront(i32),
}

const MAX_LEN: usize = 1000000;

// small chunks so that chunk boundaries and front tripling get hit constantly
type Small = Deque<i32, 4>;

fuzz_target!(|data: Vec<Op>| { fuzz(&data) });

fn fuzz(data: &[Op]) {
    let (mut d1, mut d2) = (Small::new(), Deque::<i32>::new());
    let mut v = VecDeque::<i32>::new();

    for op in data {
        match op {
            &Op::At(i) => {
                assert_eq!(d1.at(i).ok(), v.get(i));
                assert_eq!(d2.at(i).ok(), v.get(i));
                if !v.is_empty() {
                    let i = i % v.len();
                    if fastrand::bool() {
                        assert_eq!(d1[i], v[i]);
                    } else {
                        assert_eq!(d1.at(i), Ok(&v[i]));
                    }
                    assert_eq!(d2[i], v[i]);
                }
            }
            Op::Back => {
                assert_eq!(d1.back(), v.back());
                assert_eq!(d2.back(), v.back());
            }
            &Op::BackMut(a) => {
                if let Some(b) = v.back_mut() {
                    *b = a;
                    *d1.back_mut().unwrap() = a;
                    *d2.back_mut().unwrap() = a;
                } else {
                    assert!(d1.back_mut().is_none());
                    assert!(d2.back_mut().is_none());
                }
            }
            Op::Clone => {
                d1 = d1.clone();
                d2 = d2.clone();
            }
            Op::Equals => {
                assert_eq!(d1.len(), v.len());
                for (i, x) in v.iter().enumerate() {
                    assert_eq!(&d1[i], x);
                    assert_eq!(&d2[i], x);
                }
                assert!(d1 == d2);
            }
            Op::Extend(items) => {
                if v.len() + items.len() < MAX_LEN {
                    d1.extend(items);
                    d2.extend(items.iter().copied());
                    v.extend(items);
                }
            }
            &Op::Fill(n, a) => {
                let n = n as usize;
                d1 = Small::from_elem(n, a);
                d2 = Deque::from_elem(n, a);
                v = std::iter::repeat(a).take(n).collect();
            }
            Op::Front => {
                assert_eq!(d1.front(), v.front());
                assert_eq!(d2.front(), v.front());
            }
            &Op::FrontMut(a) => {
                if let Some(f) = v.front_mut() {
                    *f = a;
                    *d1.front_mut().unwrap() = a;
                    *d2.front_mut().unwrap() = a;
                } else {
                    assert!(d1.front_mut().is_none());
                    assert!(d2.front_mut().is_none());
                }
            }
            &Op::Get(i) => {
                assert_eq!(d1.get(i), v.get(i));
                assert_eq!(d2.get(i), v.get(i));
                let i = i & v.len();
                assert_eq!(d1.get(i), v.get(i));
                assert_eq!(d2.get(i), v.get(i));
            }
            &Op::IndexMut(i, a) => {
                if !v.is_empty() {
                    let i = i % v.len();
                    v[i] = a;
                    d1[i] = a;
                    *d2.at_mut(i).unwrap() = a;
                }
            }
            Op::IsEmpty => {
                assert_eq!(d1.is_empty(), v.is_empty());
                assert_eq!(d2.is_empty(), v.is_empty());
            }
            Op::Len => {
                assert_eq!(d1.len(), v.len());
                assert_eq!(d2.len(), v.len());
            }
            Op::PopBack => {
                let expected = v.pop_back();
                assert_eq!(d1.pop_back(), expected);
                assert_eq!(d2.pop_back(), expected);
            }
            &Op::PushBack(a) => {
                if v.len() < MAX_LEN {
                    d1.push_back(a);
                    d2.push_back(a);
                    v.push_back(a);
                }
            }
            &Op::PushFront(a) => {
                if v.len() < MAX_LEN {
                    d1.push_front(a);
                    d2.push_front(a);
                    v.push_front(a);
                }
            }
        }
    }
}
