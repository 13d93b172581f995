//! WGSL shader source code for whole-buffer softmax
//!
//! Softmax needs a global maximum and a global sum before any element is
//! final, so it runs as a reduction followed by an elementwise pass:
//!
//! 1. `softmax_max`: one workgroup strides over the input and tree-reduces
//!    the maximum into `scratch[0]`.
//! 2. `softmax_exp_sum`: one workgroup writes `exp(x - max)` to the output and
//!    tree-reduces the sum into `scratch[1]`.
//! 3. `softmax_normalize`: one invocation per element divides by `scratch[1]`.

/// Softmax shader module source (F32 only)
pub const SOFTMAX_SHADER: &str = r#"
const WORKGROUP_SIZE: u32 = 256u;

var<workgroup> softmax_shared: array<f32, 256>;

struct SoftmaxParams {
    numel: u32,
    _pad0: u32,
    _pad1: u32,
    _pad2: u32,
}

@group(0) @binding(0) var<storage, read> softmax_in: array<f32>;
@group(0) @binding(1) var<storage, read_write> softmax_out: array<f32>;
@group(0) @binding(2) var<storage, read_write> softmax_scratch: array<f32>;
@group(0) @binding(3) var<uniform> softmax_params: SoftmaxParams;

@compute @workgroup_size(256)
fn softmax_max(@builtin(local_invocation_id) local_id: vec3<u32>) {
    let tid = local_id.x;

    var max_val: f32 = -3.402823e+38;
    var i: u32 = tid;
    while (i < softmax_params.numel) {
        max_val = max(max_val, softmax_in[i]);
        i = i + WORKGROUP_SIZE;
    }

    softmax_shared[tid] = max_val;
    workgroupBarrier();

    for (var s: u32 = WORKGROUP_SIZE / 2u; s > 0u; s = s >> 1u) {
        if (tid < s) {
            softmax_shared[tid] = max(softmax_shared[tid], softmax_shared[tid + s]);
        }
        workgroupBarrier();
    }

    if (tid == 0u) {
        softmax_scratch[0] = softmax_shared[0];
    }
}

@compute @workgroup_size(256)
fn softmax_exp_sum(@builtin(local_invocation_id) local_id: vec3<u32>) {
    let tid = local_id.x;
    let max_val = softmax_scratch[0];

    var sum: f32 = 0.0;
    var i: u32 = tid;
    while (i < softmax_params.numel) {
        let e = exp(softmax_in[i] - max_val);
        softmax_out[i] = e;
        sum = sum + e;
        i = i + WORKGROUP_SIZE;
    }

    softmax_shared[tid] = sum;
    workgroupBarrier();

    for (var s: u32 = WORKGROUP_SIZE / 2u; s > 0u; s = s >> 1u) {
        if (tid < s) {
            softmax_shared[tid] = softmax_shared[tid] + softmax_shared[tid + s];
        }
        workgroupBarrier();
    }

    if (tid == 0u) {
        softmax_scratch[1] = softmax_shared[0];
    }
}

@compute @workgroup_size(256)
fn softmax_normalize(@builtin(global_invocation_id) gid: vec3<u32>,
                     @builtin(num_workgroups) groups: vec3<u32>) {
    let i = gid.x + gid.y * groups.x * WORKGROUP_SIZE;
    if (i < softmax_params.numel) {
        softmax_out[i] = softmax_out[i] / softmax_scratch[1];
    }
}
"#;
