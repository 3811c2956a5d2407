use nalgebra as na;

/// Rotation matrix about the vertical Y axis (slew)
pub fn rotation_y(theta: f64) -> na::Matrix3<f64> {
    let c = theta.cos();
    let s = theta.sin();

    na::Matrix3::new(
        c,  0.0, s,
        0.0, 1.0, 0.0,
        -s, 0.0, c,
    )
}

/// Yaw quaternion matching [`rotation_y`]
pub fn yaw(theta: f64) -> na::UnitQuaternion<f64> {
    na::UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), theta)
}

/// Create a 4x4 transformation matrix (rotation + translation)
pub fn transform_matrix(
    rotation: na::Matrix3<f64>,
    translation: na::Vector3<f64>,
) -> na::Matrix4<f64> {
    let mut mat = na::Matrix4::identity();
    mat.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
    mat.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
    mat
}

/// Local node matrix: translate * rotate * scale
pub fn local_matrix(
    translation: &na::Vector3<f64>,
    rotation: &na::UnitQuaternion<f64>,
    scale: &na::Vector3<f64>,
) -> na::Matrix4<f64> {
    let linear = rotation.to_rotation_matrix().into_inner() * na::Matrix3::from_diagonal(scale);
    transform_matrix(linear, *translation)
}

/// Split an affine matrix without shear back into translation, rotation and scale
pub fn decompose(matrix: &na::Matrix4<f64>) -> crate::scene::Transform {
    let translation = matrix.fixed_view::<3, 1>(0, 3).into_owned();
    let linear = matrix.fixed_view::<3, 3>(0, 0).into_owned();

    let scale = na::Vector3::new(
        linear.column(0).norm(),
        linear.column(1).norm(),
        linear.column(2).norm(),
    );

    let mut basis = linear;
    for (i, s) in scale.iter().enumerate() {
        if *s > f64::EPSILON {
            basis.column_mut(i).unscale_mut(*s);
        }
    }
    let rotation = na::UnitQuaternion::from_rotation_matrix(
        &na::Rotation3::from_matrix_unchecked(basis),
    );

    crate::scene::Transform {
        translation,
        rotation,
        scale,
    }
}

/// Apply a transformation to a point
pub fn transform_point(
    transform: &na::Matrix4<f64>,
    point: na::Point3<f64>,
) -> na::Point3<f64> {
    let homogeneous = na::Vector4::new(point.x, point.y, point.z, 1.0);
    let transformed = transform * homogeneous;
    na::Point3::new(transformed.x, transformed.y, transformed.z)
}
