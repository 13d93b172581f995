//! WGSL shader source code for element-wise operations
//!
//! Four programs, grouped by binding layout:
//! - `binary`: `out = a op b` (add, sub)
//! - `binary_inplace`: `a = a op b` (add_inplace, sub_inplace)
//! - `unary`: `out = f(a)` (scale, sigmoid, relu, tanh)
//! - `unary_inplace`: `a = f(a)` (scale_inplace)
//!
//! Every kernel runs one invocation per element. Dispatches larger than the
//! per-dimension workgroup limit spill into the y dimension, so the element
//! index is linearized from `global_invocation_id` and `num_workgroups`.

/// Common prelude: workgroup size, parameter block and index helper.
macro_rules! elementwise_prelude {
    () => {
        r#"
const WORKGROUP_SIZE: u32 = 256u;
const TANH_CLAMP: f32 = 20.0;

struct ElementwiseParams {
    numel: u32,
    scalar: f32,
    _pad0: u32,
    _pad1: u32,
}

fn linear_index(gid: vec3<u32>, groups: vec3<u32>) -> u32 {
    return gid.x + gid.y * groups.x * WORKGROUP_SIZE;
}

fn sigmoid_f32(x: f32) -> f32 {
    return 1.0 / (1.0 + exp(-x));
}

fn relu_f32(x: f32) -> f32 {
    return (x + abs(x)) / 2.0;
}

fn tanh_f32(x: f32) -> f32 {
    let c = clamp(x, -TANH_CLAMP, TANH_CLAMP);
    let e = exp(c);
    let ne = exp(-c);
    return (e - ne) / (e + ne);
}
"#
    };
}

/// Binary out-of-place kernels: a (read), b (read), out (write), params.
pub const BINARY_SHADER: &str = concat!(
    elementwise_prelude!(),
    r#"
@group(0) @binding(0) var<storage, read> binary_a: array<f32>;
@group(0) @binding(1) var<storage, read> binary_b: array<f32>;
@group(0) @binding(2) var<storage, read_write> binary_out: array<f32>;
@group(0) @binding(3) var<uniform> binary_params: ElementwiseParams;

@compute @workgroup_size(256)
fn add(@builtin(global_invocation_id) gid: vec3<u32>,
       @builtin(num_workgroups) groups: vec3<u32>) {
    let i = linear_index(gid, groups);
    if (i < binary_params.numel) {
        binary_out[i] = binary_a[i] + binary_b[i];
    }
}

@compute @workgroup_size(256)
fn sub(@builtin(global_invocation_id) gid: vec3<u32>,
       @builtin(num_workgroups) groups: vec3<u32>) {
    let i = linear_index(gid, groups);
    if (i < binary_params.numel) {
        binary_out[i] = binary_a[i] - binary_b[i];
    }
}
"#
);

/// Binary in-place kernels: a (read-write), b (read), params.
pub const BINARY_INPLACE_SHADER: &str = concat!(
    elementwise_prelude!(),
    r#"
@group(0) @binding(0) var<storage, read_write> inplace_a: array<f32>;
@group(0) @binding(1) var<storage, read> inplace_b: array<f32>;
@group(0) @binding(2) var<uniform> inplace_params: ElementwiseParams;

@compute @workgroup_size(256)
fn add_inplace(@builtin(global_invocation_id) gid: vec3<u32>,
               @builtin(num_workgroups) groups: vec3<u32>) {
    let i = linear_index(gid, groups);
    if (i < inplace_params.numel) {
        inplace_a[i] = inplace_a[i] + inplace_b[i];
    }
}

@compute @workgroup_size(256)
fn sub_inplace(@builtin(global_invocation_id) gid: vec3<u32>,
               @builtin(num_workgroups) groups: vec3<u32>) {
    let i = linear_index(gid, groups);
    if (i < inplace_params.numel) {
        inplace_a[i] = inplace_a[i] - inplace_b[i];
    }
}
"#
);

/// Unary out-of-place kernels: a (read), out (write), params.
pub const UNARY_SHADER: &str = concat!(
    elementwise_prelude!(),
    r#"
@group(0) @binding(0) var<storage, read> unary_a: array<f32>;
@group(0) @binding(1) var<storage, read_write> unary_out: array<f32>;
@group(0) @binding(2) var<uniform> unary_params: ElementwiseParams;

@compute @workgroup_size(256)
fn scale(@builtin(global_invocation_id) gid: vec3<u32>,
         @builtin(num_workgroups) groups: vec3<u32>) {
    let i = linear_index(gid, groups);
    if (i < unary_params.numel) {
        unary_out[i] = unary_a[i] * unary_params.scalar;
    }
}

@compute @workgroup_size(256)
fn sigmoid(@builtin(global_invocation_id) gid: vec3<u32>,
           @builtin(num_workgroups) groups: vec3<u32>) {
    let i = linear_index(gid, groups);
    if (i < unary_params.numel) {
        unary_out[i] = sigmoid_f32(unary_a[i]);
    }
}

@compute @workgroup_size(256)
fn relu(@builtin(global_invocation_id) gid: vec3<u32>,
        @builtin(num_workgroups) groups: vec3<u32>) {
    let i = linear_index(gid, groups);
    if (i < unary_params.numel) {
        unary_out[i] = relu_f32(unary_a[i]);
    }
}

@compute @workgroup_size(256)
fn tanh_activation(@builtin(global_invocation_id) gid: vec3<u32>,
                   @builtin(num_workgroups) groups: vec3<u32>) {
    let i = linear_index(gid, groups);
    if (i < unary_params.numel) {
        unary_out[i] = tanh_f32(unary_a[i]);
    }
}
"#
);

/// Unary in-place kernels: a (read-write), params.
pub const UNARY_INPLACE_SHADER: &str = concat!(
    elementwise_prelude!(),
    r#"
@group(0) @binding(0) var<storage, read_write> unary_inplace_a: array<f32>;
@group(0) @binding(1) var<uniform> unary_inplace_params: ElementwiseParams;

@compute @workgroup_size(256)
fn scale_inplace(@builtin(global_invocation_id) gid: vec3<u32>,
                 @builtin(num_workgroups) groups: vec3<u32>) {
    let i = linear_index(gid, groups);
    if (i < unary_inplace_params.numel) {
        unary_inplace_a[i] = unary_inplace_a[i] * unary_inplace_params.scalar;
    }
}
"#
);
