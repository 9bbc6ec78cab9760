//! Bundled adapters for std network types.
//!
//! They go through the same public registration API as any host extension and decode
//! to [`Value::Object`].

use crate::{
    dispatch::Dispatch,
    encoding::{oid, ValueReader, ValueWriter},
    errors::Result,
    Value,
};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV4};

fn put_ipv4(a: &Ipv4Addr, w: &mut dyn ValueWriter) -> Result<()> {
    w.write_oid(oid::IPV4_ADDR)?;
    w.write_u32(u32::from(*a))
}

fn get_ipv4(r: &mut dyn ValueReader) -> Result<Value> { Ok(Value::object(Ipv4Addr::from(r.read_u32()?))) }

fn put_ipv6(a: &Ipv6Addr, w: &mut dyn ValueWriter) -> Result<()> {
    w.write_oid(oid::IPV6_ADDR)?;
    w.put_slice("write ipv6", &a.octets())
}

fn get_ipv6(r: &mut dyn ValueReader) -> Result<Value> {
    let mut octets = [0u8; 16];
    r.take_exact("read ipv6", &mut octets)?;
    Ok(Value::object(Ipv6Addr::from(octets)))
}

fn put_socket_v4(a: &SocketAddrV4, w: &mut dyn ValueWriter) -> Result<()> {
    w.write_oid(oid::SOCKET_ADDR_V4)?;
    w.write_u32(u32::from(*a.ip()))?;
    w.write_u16(a.port())
}

fn get_socket_v4(r: &mut dyn ValueReader) -> Result<Value> {
    let ip = Ipv4Addr::from(r.read_u32()?);
    let port = r.read_u16()?;
    Ok(Value::object(SocketAddrV4::new(ip, port)))
}

/// Registers the std adapters on `d`.
pub fn register_std(d: &mut Dispatch) -> Result<&mut Dispatch> {
    d.register::<Ipv4Addr, _, _>(oid::IPV4_ADDR, put_ipv4, get_ipv4)?
        .register::<Ipv6Addr, _, _>(oid::IPV6_ADDR, put_ipv6, get_ipv6)?
        .register::<SocketAddrV4, _, _>(oid::SOCKET_ADDR_V4, put_socket_v4, get_socket_v4)
}
