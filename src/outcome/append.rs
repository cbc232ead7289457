// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tuple growth for accumulated outcome values

/// A tuple that can be extended by one element
pub trait Append<T> {
    type Output;

    fn append(self, value: T) -> Self::Output;
}

macro_rules! impl_append {
    ($($name:ident),+) => {
        impl<$($name,)+ T> Append<T> for ($($name,)+) {
            type Output = ($($name,)+ T);

            #[allow(non_snake_case)]
            fn append(self, value: T) -> Self::Output {
                let ($($name,)+) = self;
                ($($name,)+ value)
            }
        }
    };
}

impl_append!(A, B);
impl_append!(A, B, C);
impl_append!(A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_to_pair_and_triple() {
        assert_eq!((1, "two").append(3.0), (1, "two", 3.0));
        assert_eq!((1, 2, 3).append('4'), (1, 2, 3, '4'));
        assert_eq!((1, 2, 3, 4).append(5), (1, 2, 3, 4, 5));
    }
}
