// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A macro to declare bitflag sets with named constants.

/// Declares a bitflag struct with named constants, set operations and a
/// readable `Debug` output.
#[macro_export]
#[doc(hidden)]
macro_rules! sable_bitflags {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident: $ty:ty {
            $(
                $(#[$flag_attr:meta])*
                const $flag_name:ident = $flag_value:expr;
            )*
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name {
            bits: $ty,
        }

        impl $name {
            /// An empty set of flags.
            pub const EMPTY: Self = Self { bits: 0 };

            /// Creates a flag set from raw bits, keeping unknown bits.
            pub const fn from_bits_truncate(bits: $ty) -> Self {
                Self { bits }
            }

            /// Returns the raw value of the flag set.
            pub const fn bits(&self) -> $ty {
                self.bits
            }

            /// Returns `true` if no flag is set.
            pub const fn is_empty(&self) -> bool {
                self.bits == 0
            }

            /// Returns `true` if all flags in `other` are contained within `self`.
            pub const fn contains(&self, other: Self) -> bool {
                (self.bits & other.bits) == other.bits
            }

            /// Returns `true` if any flag in `other` is contained within `self`.
            pub const fn intersects(&self, other: Self) -> bool {
                (self.bits & other.bits) != 0
            }

            /// Inserts the flags in `other` into `self`.
            pub fn insert(&mut self, other: Self) {
                self.bits |= other.bits;
            }

            /// Removes the flags in `other` from `self`.
            pub fn remove(&mut self, other: Self) {
                self.bits &= !other.bits;
            }

            $(
                $(#[$flag_attr])*
                pub const $flag_name: Self = Self { bits: $flag_value };
            )*
        }

        impl core::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, other: Self) -> Self {
                Self { bits: self.bits | other.bits }
            }
        }

        impl core::ops::BitAnd for $name {
            type Output = Self;
            fn bitand(self, other: Self) -> Self {
                Self { bits: self.bits & other.bits }
            }
        }

        impl core::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, other: Self) {
                self.bits |= other.bits;
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                const FLAGS: &[(&str, $ty)] = &[$((stringify!($flag_name), $flag_value)),*];
                let mut bits = self.bits;
                let mut first_flag = true;

                write!(f, "{} {{ ", stringify!($name))?;

                // Only single-bit constants are listed; composites show as their parts.
                for &(flag_name, value) in FLAGS {
                    if value.count_ones() != 1 || (bits & value) == 0 {
                        continue;
                    }
                    if !first_flag {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", flag_name)?;
                    bits &= !value;
                    first_flag = false;
                }

                if bits != 0 {
                    if !first_flag {
                        write!(f, " | ")?;
                    }
                    write!(f, "UNKNOWN({:#x})", bits)?;
                    first_flag = false;
                }

                if first_flag {
                    write!(f, "EMPTY")?;
                }

                write!(f, " }}")
            }
        }
    };
}

#[cfg(test)]
mod tests {
    sable_bitflags! {
        /// Flags used to exercise the macro.
        pub struct PassFlags: u32 {
            const DEPTH = 1 << 0;
            const COLOR = 1 << 1;
            const STENCIL = 1 << 2;
        }
    }

    #[test]
    fn test_empty_flags() {
        let flags = PassFlags::default();
        assert!(flags.is_empty());
        assert!(flags.contains(PassFlags::EMPTY));
        assert!(!flags.contains(PassFlags::DEPTH));
        assert_eq!(format!("{:?}", flags), "PassFlags { EMPTY }");
    }

    #[test]
    fn test_combined_flags() {
        let flags = PassFlags::DEPTH | PassFlags::STENCIL;
        assert_eq!(flags.bits(), 0b101);
        assert!(flags.contains(PassFlags::DEPTH));
        assert!(!flags.contains(PassFlags::COLOR));
        assert!(flags.intersects(PassFlags::STENCIL | PassFlags::COLOR));
        assert_eq!(format!("{:?}", flags), "PassFlags { DEPTH | STENCIL }");
    }

    #[test]
    fn test_insert_and_remove() {
        let mut flags = PassFlags::COLOR;
        flags.insert(PassFlags::DEPTH);
        assert_eq!(flags, PassFlags::COLOR | PassFlags::DEPTH);
        flags.remove(PassFlags::COLOR);
        assert_eq!(flags, PassFlags::DEPTH);
    }

    sable_bitflags! {
        /// Flags with a composite declared after its parts.
        pub struct StageFlags: u8 {
            const VERTEX = 1 << 0;
            const FRAGMENT = 1 << 1;
            const ALL_GRAPHICS = (1 << 0) | (1 << 1);
        }
    }

    #[test]
    fn test_composites_are_listed_by_parts() {
        assert_eq!(
            format!("{:?}", StageFlags::ALL_GRAPHICS),
            "StageFlags { VERTEX | FRAGMENT }"
        );
        assert_eq!(StageFlags::VERTEX | StageFlags::FRAGMENT, StageFlags::ALL_GRAPHICS);
    }

    #[test]
    fn test_unknown_bits_are_reported() {
        let flags = PassFlags::COLOR | PassFlags::from_bits_truncate(1 << 8);
        assert_eq!(format!("{:?}", flags), "PassFlags { COLOR | UNKNOWN(0x100) }");
    }
}
