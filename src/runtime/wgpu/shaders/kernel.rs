//! Static kernel registry
//!
//! Every device kernel is identified by a [`KernelId`]. The id resolves to the
//! program source it lives in, its entry point and the binding layout it
//! declares. The registry is plain `&'static` data and is only consumed by the
//! [`KernelCache`](super::KernelCache).

use std::fmt;

use super::elementwise_wgsl::{
    BINARY_INPLACE_SHADER, BINARY_SHADER, UNARY_INPLACE_SHADER, UNARY_SHADER,
};
use super::matmul_wgsl::MATMUL_SHADER;
use super::softmax_wgsl::SOFTMAX_SHADER;

/// How a kernel accesses one of its bindings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingKind {
    /// `var<storage, read>`
    StorageRead,
    /// `var<storage, read_write>`
    StorageReadWrite,
    /// `var<uniform>` parameter block
    Uniform,
}

/// A program source holding one or more kernels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Program {
    /// Program name, used as the module cache key
    pub name: &'static str,
    /// WGSL source text
    pub source: &'static str,
}

const BINARY: Program = Program {
    name: "binary",
    source: BINARY_SHADER,
};
const BINARY_INPLACE: Program = Program {
    name: "binary_inplace",
    source: BINARY_INPLACE_SHADER,
};
const UNARY: Program = Program {
    name: "unary",
    source: UNARY_SHADER,
};
const UNARY_INPLACE: Program = Program {
    name: "unary_inplace",
    source: UNARY_INPLACE_SHADER,
};
const MATMUL: Program = Program {
    name: "matmul",
    source: MATMUL_SHADER,
};
const SOFTMAX: Program = Program {
    name: "softmax",
    source: SOFTMAX_SHADER,
};

use BindingKind::{StorageRead as R, StorageReadWrite as RW, Uniform as U};

const BINARY_BINDINGS: &[BindingKind] = &[R, R, RW, U];
const BINARY_INPLACE_BINDINGS: &[BindingKind] = &[RW, R, U];
const UNARY_BINDINGS: &[BindingKind] = &[R, RW, U];
const UNARY_INPLACE_BINDINGS: &[BindingKind] = &[RW, U];
const MATMUL_BINDINGS: &[BindingKind] = &[R, R, RW, U];
const SOFTMAX_BINDINGS: &[BindingKind] = &[R, RW, RW, U];

/// Identifier of a device kernel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelId {
    /// `out = a + b`
    Add,
    /// `out = a - b`
    Sub,
    /// `a += b`
    AddInplace,
    /// `a -= b`
    SubInplace,
    /// Matrix product
    Mul,
    /// `out = s * a`
    Scale,
    /// `a *= s`
    ScaleInplace,
    /// Logistic sigmoid
    Sigmoid,
    /// Rectified linear unit
    Relu,
    /// Hyperbolic tangent
    Tanh,
    /// Softmax phase 1a: global maximum
    SoftmaxMax,
    /// Softmax phase 1b: shifted exponentials and their sum
    SoftmaxExpSum,
    /// Softmax phase 2: divide by the sum
    SoftmaxNormalize,
}

impl KernelId {
    /// Every registered kernel
    pub const ALL: [KernelId; 13] = [
        KernelId::Add,
        KernelId::Sub,
        KernelId::AddInplace,
        KernelId::SubInplace,
        KernelId::Mul,
        KernelId::Scale,
        KernelId::ScaleInplace,
        KernelId::Sigmoid,
        KernelId::Relu,
        KernelId::Tanh,
        KernelId::SoftmaxMax,
        KernelId::SoftmaxExpSum,
        KernelId::SoftmaxNormalize,
    ];

    /// Program this kernel is compiled from
    pub fn program(self) -> Program {
        match self {
            KernelId::Add | KernelId::Sub => BINARY,
            KernelId::AddInplace | KernelId::SubInplace => BINARY_INPLACE,
            KernelId::Scale | KernelId::Sigmoid | KernelId::Relu | KernelId::Tanh => UNARY,
            KernelId::ScaleInplace => UNARY_INPLACE,
            KernelId::Mul => MATMUL,
            KernelId::SoftmaxMax | KernelId::SoftmaxExpSum | KernelId::SoftmaxNormalize => {
                SOFTMAX
            }
        }
    }

    /// WGSL source text of this kernel's program
    #[inline]
    pub fn source(self) -> &'static str {
        self.program().source
    }

    /// Entry point name inside the program
    pub fn entry_point(self) -> &'static str {
        match self {
            KernelId::Add => "add",
            KernelId::Sub => "sub",
            KernelId::AddInplace => "add_inplace",
            KernelId::SubInplace => "sub_inplace",
            KernelId::Mul => "matmul",
            KernelId::Scale => "scale",
            KernelId::ScaleInplace => "scale_inplace",
            KernelId::Sigmoid => "sigmoid",
            KernelId::Relu => "relu",
            KernelId::Tanh => "tanh_activation",
            KernelId::SoftmaxMax => "softmax_max",
            KernelId::SoftmaxExpSum => "softmax_exp_sum",
            KernelId::SoftmaxNormalize => "softmax_normalize",
        }
    }

    /// Bindings in declaration order (binding index = position)
    pub fn bindings(self) -> &'static [BindingKind] {
        match self {
            KernelId::Add | KernelId::Sub => BINARY_BINDINGS,
            KernelId::AddInplace | KernelId::SubInplace => BINARY_INPLACE_BINDINGS,
            KernelId::Scale | KernelId::Sigmoid | KernelId::Relu | KernelId::Tanh => {
                UNARY_BINDINGS
            }
            KernelId::ScaleInplace => UNARY_INPLACE_BINDINGS,
            KernelId::Mul => MATMUL_BINDINGS,
            KernelId::SoftmaxMax | KernelId::SoftmaxExpSum | KernelId::SoftmaxNormalize => {
                SOFTMAX_BINDINGS
            }
        }
    }

    /// Stable name for logs and errors
    #[inline]
    pub fn name(self) -> &'static str {
        self.entry_point()
    }
}

impl fmt::Display for KernelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
