//! Operator boilerplate shared by the vector and quaternion types

/// `+`, `-` between two values of the same type, component-wise
macro_rules! impl_additive_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl_binary_op!($ty, Add, add, AddAssign, add_assign, +, { $($field),+ });
        impl_binary_op!($ty, Sub, sub, SubAssign, sub_assign, -, { $($field),+ });
    };
}

/// `impl_additive_ops!` plus a component-wise unary `-`
macro_rules! impl_component_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl_additive_ops!($ty { $($field),+ });

        impl std::ops::Neg for $ty {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }
    };
}

/// `*`, `/` by a scalar on either side, broadcast to every component
macro_rules! impl_scalar_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl_scalar_op!($ty, Mul, mul, MulAssign, mul_assign, *, { $($field),+ });
        impl_scalar_op!($ty, Div, div, DivAssign, div_assign, /, { $($field),+ });

        impl std::ops::Mul<$ty> for $crate::Value {
            type Output = $ty;
            #[inline]
            fn mul(self, v: $ty) -> $ty {
                v * self
            }
        }
    };
}

/// `*`, `/` between two vectors and `+`, `-` with a scalar, component-wise
macro_rules! impl_elementwise_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl_binary_op!($ty, Mul, mul, MulAssign, mul_assign, *, { $($field),+ });
        impl_binary_op!($ty, Div, div, DivAssign, div_assign, /, { $($field),+ });
        impl_scalar_op!($ty, Add, add, AddAssign, add_assign, +, { $($field),+ });
        impl_scalar_op!($ty, Sub, sub, SubAssign, sub_assign, -, { $($field),+ });
    };
}

macro_rules! impl_binary_op {
    ($ty:ident, $trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt, { $($field:ident),+ }) => {
        impl std::ops::$trait for $ty {
            type Output = Self;
            #[inline]
            fn $method(self, other: Self) -> Self {
                Self { $($field: self.$field $op other.$field),+ }
            }
        }

        impl std::ops::$assign_trait for $ty {
            #[inline]
            fn $assign_method(&mut self, other: Self) {
                *self = *self $op other;
            }
        }
    };
}

macro_rules! impl_scalar_op {
    ($ty:ident, $trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt, { $($field:ident),+ }) => {
        impl std::ops::$trait<$crate::Value> for $ty {
            type Output = Self;
            #[inline]
            fn $method(self, s: $crate::Value) -> Self {
                Self { $($field: self.$field $op s),+ }
            }
        }

        impl std::ops::$assign_trait<$crate::Value> for $ty {
            #[inline]
            fn $assign_method(&mut self, s: $crate::Value) {
                *self = *self $op s;
            }
        }
    };
}
